//! 全局提示框
//!
//! 表单动作的错误、登录/创建成功等一次性消息都经由这里展示，3 秒后自动消失。

use std::time::Duration;

use leptos::prelude::*;

const TOAST_LIFETIME: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn alert_class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success shadow-lg",
            Self::Error => "alert alert-error shadow-lg",
            Self::Info => "alert alert-info shadow-lg",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Toast {
    id: u64,
    kind: ToastKind,
    message: String,
}

/// 提示框上下文
#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                message: message.into(),
            })
        });

        let toasts = self.toasts;
        set_timeout(
            move || toasts.update(|list| list.retain(|t| t.id != id)),
            TOAST_LIFETIME,
        );
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }
}

pub fn provide_toasts() -> ToastContext {
    let ctx = ToastContext::new();
    provide_context(ctx);
    ctx
}

pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

/// 提示框渲染出口，放在页面骨架末尾
#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_toasts();

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    view! {
                        <div class=toast.kind.alert_class() role="status">
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
