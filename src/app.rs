mod distribution;
mod header;
mod homepage;
mod posts;
mod theme;

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use distribution::{CategoriesPage, TagsPage};
use header::Header;
use homepage::HomePage;
use posts::{PostsPage, TagPostsPage};
pub use theme::{provide_theme, Theme, ThemeContext};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark light" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/ink-blog.css" />
                <MetaTags />
            </head>
            <body class="font-mono">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();
    let theme = provide_theme();

    view! {
        <Title formatter=|title| format!("Ink Blog - {title}") />

        <Router>
            <div class=move || {
                format!("{} min-h-screen flex flex-col", theme.theme.get().class())
            }>
                <Header />
                <main class="flex flex-col flex-grow items-center mx-auto w-full max-w-6xl px-4 py-8">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/posts") view=PostsPage />
                        <Route path=path!("/categories") view=CategoriesPage />
                        <Route path=path!("/tags") view=TagsPage />
                        <Route path=path!("/tags/:slug") view=TagPostsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
