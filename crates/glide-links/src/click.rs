//! Click disposition
//!
//! Middle clicks and modifier clicks open pages in new tabs or windows;
//! those must reach the browser untouched. A plain click on the page the
//! user is already on does nothing at all.

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// The parts of a pointer activation the engine cares about.
#[derive(Debug, Clone, Copy)]
pub struct Click {
    pub button: MouseButton,
    pub ctrl: bool,
    pub meta: bool,
}

impl Click {
    pub fn left() -> Self {
        Self {
            button: MouseButton::Left,
            ctrl: false,
            meta: false,
        }
    }

    pub fn middle() -> Self {
        Self {
            button: MouseButton::Middle,
            ctrl: false,
            meta: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Let the browser handle it (new tab/window).
    Native,
    /// Target equals the current location; take no action.
    AlreadyHere,
    /// Run the navigation pipeline.
    Navigate,
}

pub fn disposition(click: &Click, target: &Url, current: &Url) -> ClickDisposition {
    if click.button != MouseButton::Left || click.ctrl || click.meta {
        return ClickDisposition::Native;
    }
    if target == current {
        return ClickDisposition::AlreadyHere;
    }
    ClickDisposition::Navigate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_modifier_clicks_stay_native() {
        let target = url("https://example.com/page");
        let current = url("https://example.com/start");

        assert_eq!(
            disposition(&Click::middle(), &target, &current),
            ClickDisposition::Native
        );

        let ctrl_click = Click {
            ctrl: true,
            ..Click::left()
        };
        assert_eq!(
            disposition(&ctrl_click, &target, &current),
            ClickDisposition::Native
        );

        let meta_click = Click {
            meta: true,
            ..Click::left()
        };
        assert_eq!(
            disposition(&meta_click, &target, &current),
            ClickDisposition::Native
        );
    }

    #[test]
    fn test_current_location_short_circuits() {
        let here = url("https://example.com/start");
        assert_eq!(
            disposition(&Click::left(), &here, &here),
            ClickDisposition::AlreadyHere
        );
    }

    #[test]
    fn test_plain_click_navigates() {
        assert_eq!(
            disposition(
                &Click::left(),
                &url("https://example.com/page"),
                &url("https://example.com/start")
            ),
            ClickDisposition::Navigate
        );
    }
}
