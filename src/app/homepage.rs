use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Home" />
        <div class="max-w-6xl mx-auto page-content">
            <h1 class="text-3xl my-8 text-center font-bold section-content">
                "Ink Blog"
            </h1>
            <p class="text-lg text-center text-muted mb-8 section-content">
                "Notes on systems, the web, and the odd circuit board."
            </p>
            <section class="flex flex-col lg:flex-row gap-8 lg:gap-12 section-content">
                <div class="w-full lg:max-w-2xl">
                    <h2 class="text-xl font-bold my-8">"About"</h2>
                    <p class="text-base mb-4 leading-relaxed">
                        "I write about the things I build: web front-ends, embedded toys, and the tooling in between. "
                        "Posts live in a headless CMS and are rendered here."
                    </p>
                    <div class="bg-brightBlack/30 p-4 rounded-md border-l-4 border-purple mb-4">
                        <p class="text-sm text-purple mb-2 font-medium">"💡 Where to start"</p>
                        <ul class="text-sm space-y-1">
                            <li>
                                <A href="/posts" attr:class="text-cyan">"posts"</A>
                                ": everything, newest first"
                            </li>
                            <li>
                                <A href="/categories" attr:class="text-cyan">"categories"</A>
                                ": what I write about, as a chart"
                            </li>
                            <li>
                                <A href="/tags" attr:class="text-cyan">"tags"</A>
                                ": the finer-grained view"
                            </li>
                        </ul>
                    </div>
                </div>
                <div class="w-full lg:max-w-2xl">
                    <h2 class="text-xl font-bold my-8">"Elsewhere"</h2>
                    <p class="text-base mb-4 leading-relaxed">
                        "Hover the category chart to see how the posts split up, "
                        "or click a legend entry to hide it."
                    </p>
                    <div class="flex gap-3">
                        <a
                            href="https://github.com"
                            target="_blank"
                            rel="noopener noreferrer"
                            class="text-white hover:text-brightWhite text-2xl"
                            aria-label="GitHub Profile"
                        >
                            <i class="devicon-github-plain"></i>
                        </a>
                    </div>
                </div>
            </section>
        </div>
    }
}
