use leptos::prelude::*;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

/// A dismissible message shown above the booking flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    fn intent(&self) -> MessageBarIntent {
        match self.kind {
            NoticeKind::Warning => MessageBarIntent::Warning,
            NoticeKind::Error => MessageBarIntent::Error,
        }
    }
}

#[component]
pub fn NoticeBar(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|current| {
            view! {
                <div class="notice-bar" role="alert">
                    <MessageBar intent=current.intent()>
                        {current.message.clone()}
                    </MessageBar>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        class="notice-dismiss"
                        on_click=move |_| notice.set(None)
                    >
                        "×"
                    </Button>
                </div>
            }
        })
    }
}
