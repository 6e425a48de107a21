//! App-wide toast notifications.
//!
//! Stores and forms push a [`Notice`] instead of rendering their own error
//! popups; [`NotificationTray`] renders the queue in a fixed corner and
//! notices dismiss themselves after a few seconds (or on click).

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
const DISMISS_AFTER_SECS: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice notice--info",
            NoticeLevel::Success => "notice notice--success",
            NoticeLevel::Warning => "notice notice--warning",
            NoticeLevel::Error => "notice notice--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeBoard {
    entries: Vec<Notice>,
    next_id: u64,
}

impl NoticeBoard {
    pub fn push(&mut self, level: NoticeLevel, message: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notice {
            id,
            level,
            message: message.to_string(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }
}

/// Get the shared notice board.
pub fn use_notices() -> Signal<NoticeBoard> {
    use_context::<Signal<NoticeBoard>>()
}

/// Push a notice and schedule its dismissal.
pub fn notify(board: &mut Signal<NoticeBoard>, level: NoticeLevel, message: &str) {
    let id = board.write().push(level, message);

    #[cfg(target_arch = "wasm32")]
    {
        let mut board = *board;
        spawn(async move {
            gloo_timers::future::sleep(std::time::Duration::from_secs(DISMISS_AFTER_SECS)).await;
            board.write().dismiss(id);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        // native builds (tests) keep notices until dismissed explicitly
        let _ = id;
    }
}

/// Provider component for the notice board.
#[component]
pub fn NotificationProvider(children: Element) -> Element {
    let board = use_signal(NoticeBoard::default);
    use_context_provider(|| board);

    rsx! {
        {children}
    }
}

/// Fixed-position tray rendering the queued notices.
#[component]
pub fn NotificationTray() -> Element {
    let mut board = use_notices();
    let notices = board().entries().to_vec();

    rsx! {
        div {
            class: "notice-tray",
            for notice in notices {
                div {
                    key: "{notice.id}",
                    class: notice.level.class(),
                    onclick: {
                        let id = notice.id;
                        move |_| board.write().dismiss(id)
                    },
                    "{notice.message}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut board = NoticeBoard::default();
        let a = board.push(NoticeLevel::Error, "first");
        let b = board.push(NoticeLevel::Info, "second");
        assert_eq!(board.entries().len(), 2);

        board.dismiss(a);
        assert_eq!(board.entries().len(), 1);
        assert_eq!(board.entries()[0].id, b);
    }
}
