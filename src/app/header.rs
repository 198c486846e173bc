use leptos::prelude::*;
use leptos_router::{components::*, hooks::use_location};

use super::theme::ThemeContext;

const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "~"),
    ("/posts", "posts"),
    ("/categories", "categories"),
    ("/tags", "tags"),
];

fn dir_from_pathname(pathname: &str) -> String {
    match pathname.trim_end_matches('/').rsplit('/').next() {
        Some(dir) if !dir.is_empty() => dir.to_string(),
        _ => "ink-blog".to_string(),
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let theme = expect_context::<ThemeContext>();
    let location = use_location();

    view! {
        <header class="shadow-lg">
            <div class="mx-auto px-4 sm:px-6 lg:px-8 py-4">
                <div class="flex flex-wrap items-center justify-between gap-4">
                    <div class="text-2xl font-bold mr-4">
                        {move || {
                            let dir = dir_from_pathname(&location.pathname.get());
                            view! { <Ps1 path=dir /> }
                        }}
                    </div>
                    <nav class="flex items-center gap-4">
                        {NAV_LINKS
                            .into_iter()
                            .map(|(href, label)| {
                                view! {
                                    <A
                                        href=href
                                        attr:class="text-cyan hover:text-brightCyan transition-colors duration-200"
                                    >
                                        {label}
                                    </A>
                                }
                            })
                            .collect_view()}
                        <button
                            class="px-2 py-1 rounded-md border border-muted/30 hover:bg-brightBlack/20"
                            aria-label="Toggle theme"
                            on:click=move |_| theme.toggle()
                        >
                            {move || theme.theme.get().icon()}
                        </button>
                    </nav>
                </div>
            </div>
        </header>
    }
}

#[component]
fn Ps1(path: String) -> impl IntoView {
    view! {
        <span class="text-green">"➜"</span>
        " "
        <A href="/">
            <span class="text-cyan">{path}</span>
            " "
            <span class="text-blue">
                <span>"git:("</span>
                <span class="text-red">"main"</span>
                <span>")"</span>
            </span>
        </A>
        " "
        <span class="text-yellow">"✗"</span>
    }
}
