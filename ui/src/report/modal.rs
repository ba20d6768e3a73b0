use dioxus::prelude::*;
use tracing::{error, info};

use super::{
    job::{CancelToken, JobStatus},
    pipeline::ReportPipeline,
    settle::SettlePolicy,
    variants::ReportRequest,
};
use crate::{
    api::ApiClient,
    core::{platform, timing::sleep_ms},
};

/// Progress overlay that owns one report job from open to close.
///
/// The job starts on mount. Closing the overlay flips the job's cancel token;
/// a failed job raises an alert and closes; a finished one lingers for the
/// settle policy's `close_ms` so the final message is readable.
#[component]
pub fn ReportModal(request: ReportRequest, on_close: EventHandler<()>) -> Element {
    let api = use_context::<ApiClient>();
    let settle = try_use_context::<SettlePolicy>().unwrap_or_default();
    let token = use_hook(CancelToken::new);
    let mut status = use_signal(JobStatus::starting);
    let title = request.plan().title;

    {
        let token = token.clone();
        use_drop(move || token.cancel());
    }

    {
        let token = token.clone();
        use_hook(move || {
            spawn(async move {
                let pipeline = ReportPipeline::for_platform(api).with_settle(settle);
                let outcome = pipeline
                    .run(&request, &token, |next| status.set(next))
                    .await;
                match outcome {
                    Ok(delivery) => {
                        info!("{}", delivery.describe());
                        sleep_ms(settle.close_ms).await;
                        if !token.is_cancelled() {
                            on_close.call(());
                        }
                    }
                    Err(err) if err.is_cancelled() => {}
                    Err(err) => {
                        error!(%err, "report job failed");
                        platform::alert(&err.alert_message());
                        on_close.call(());
                    }
                }
            })
        });
    }

    let JobStatus { percent, message, .. } = status();
    let cancel = move |_: MouseEvent| {
        token.cancel();
        on_close.call(());
    };

    rsx! {
        div { class: "report-modal",
            div { class: "report-modal__backdrop" }
            div {
                class: "report-modal__dialog",
                role: "dialog",
                aria_modal: "true",
                h3 { class: "report-modal__title", "{title}" }
                div { class: "report-modal__progress",
                    div {
                        class: "report-modal__bar",
                        style: "width: {percent}%",
                    }
                }
                p { class: "report-modal__status",
                    span { class: "report-modal__percent", "{percent}%" }
                    " {message}"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: cancel,
                    "Batal"
                }
            }
        }
    }
}
