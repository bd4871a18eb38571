use iced::{window, Size};

use crate::{WINDOW_HEIGHT, WINDOW_WIDTH};

pub(crate) fn native_window_settings() -> window::Settings {
    let mut settings = window::Settings::default();
    settings.size = Size::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    settings.min_size = Some(Size::new(520.0, 320.0));
    settings.position = window::Position::Centered;
    settings.resizable = true;
    settings.decorations = true;
    // Close requests go through the update loop so the fetch is torn down first.
    settings.exit_on_close_request = false;

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_requests_are_routed_through_update() {
        let settings = native_window_settings();
        assert!(!settings.exit_on_close_request);
        assert_eq!(settings.size, Size::new(WINDOW_WIDTH, WINDOW_HEIGHT));
    }
}
