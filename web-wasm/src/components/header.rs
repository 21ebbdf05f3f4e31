//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Sheet Filter - Excel絞り込み・抽出"</h1>
        </header>
    }
}
