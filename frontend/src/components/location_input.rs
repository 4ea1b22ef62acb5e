//! 地址输入框（带联想）
//!
//! 状态机在 `eventspark::autocomplete`；这里只负责把 DOM 事件接上去：
//! 输入经防抖后查询，新查询会中止上一个进行中的请求，过期的结果被丢弃。

use eventspark::autocomplete::{Autocomplete, AutocompleteKey, KeyOutcome, fetch_after_debounce};
use eventspark::geocode::PhotonGeocoder;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::web::{AbortableHttpClient, sleep};

#[component]
pub fn LocationInput(
    /// 表单字段名
    #[prop(into, default = "location".into())]
    name: String,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let api = use_api();
    let config = api.config().clone();
    let geocoder = PhotonGeocoder::from_config(&config);
    let debounce_ms = config.suggestion_debounce.as_millis() as u32;

    let state = RwSignal::new(Autocomplete::new(&config));
    let client = AbortableHttpClient::new();

    let on_input = {
        let client = client.clone();
        move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            let Some(pending) = state.try_update(|ac| ac.input(&value)).flatten() else {
                // 输入过短：不再需要仍在路上的请求
                client.abort();
                return;
            };

            let client = client.clone();
            let geocoder = geocoder.clone();
            spawn_local(async move {
                let found =
                    fetch_after_debounce(&geocoder, &client, pending, sleep(debounce_ms)).await;
                if let Some((ticket, list)) = found {
                    state.update(|ac| {
                        ac.resolve(&ticket, list);
                    });
                }
            });
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let Some(key) = AutocompleteKey::from_key(&ev.key()) else {
            return;
        };
        match state.try_update(|ac| ac.key(key)) {
            Some(KeyOutcome::Ignored) | None => {}
            // 选中项时不能顺带提交表单
            Some(_) => ev.prevent_default(),
        }
    };

    let on_blur = move |_: web_sys::FocusEvent| {
        client.abort();
        state.update(Autocomplete::close);
    };

    let suggestions = move || {
        state.with(|ac| {
            let highlight = ac.highlight();
            ac.visible()
                .iter()
                .enumerate()
                .map(|(i, s)| (i, s.label.clone(), highlight == Some(i)))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="relative">
            <input
                type="text"
                name=name
                required=required
                autocomplete="off"
                placeholder="Start typing an address…"
                class="input input-bordered w-full"
                role="combobox"
                aria-autocomplete="list"
                aria-expanded=move || state.with(Autocomplete::is_open).to_string()
                prop:value=move || state.with(|ac| ac.query().to_string())
                on:input=on_input
                on:keydown=on_keydown
                on:blur=on_blur
            />
            <Show when=move || state.with(Autocomplete::is_open)>
                <ul
                    class="menu absolute z-20 mt-1 w-full rounded-box bg-base-100 shadow-lg"
                    role="listbox"
                >
                    {move || {
                        suggestions()
                            .into_iter()
                            .map(|(index, label, active)| {
                                // mousedown 先于 blur 触发，阻止默认行为以保留焦点
                                let on_pick = move |ev: web_sys::MouseEvent| {
                                    ev.prevent_default();
                                    state.update(|ac| {
                                        ac.select(index);
                                    });
                                };
                                view! {
                                    <li role="option" aria-selected=active.to_string()>
                                        <a class:active=active on:mousedown=on_pick>
                                            {label}
                                        </a>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
