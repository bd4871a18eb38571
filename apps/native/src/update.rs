use iced::{window, Task};

use crate::{App, Message};

pub(crate) fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::ListingFetched { generation, result } => {
            if !app.lifecycle.accepts(generation) {
                tracing::debug!(generation, "dropping listing for a stale or torn down view");
                return Task::none();
            }

            app.fetch_handle = None;
            match result {
                Ok(listing) => app.store.replace(listing),
                Err(failure) => app.store.fail(failure),
            }

            Task::none()
        }
        Message::CloseRequested(id) => {
            app.teardown();
            window::close(id)
        }
    }
}
