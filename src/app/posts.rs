use leptos::{prelude::*, server_fn::codec::GetUrl};
use leptos_meta::Title;
use leptos_router::{components::*, hooks::*};

use crate::cms::{PostSummary, Taxonomy};

#[server(input = GetUrl)]
pub async fn get_posts_server() -> Result<Vec<PostSummary>, ServerFnError> {
    let cms = use_context::<crate::cms::CmsClient>()
        .ok_or_else(|| ServerFnError::new("CMS client not configured"))?;
    cms.get_posts()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server(input = GetUrl)]
pub async fn get_tag_posts(slug: String) -> Result<(Taxonomy, Vec<PostSummary>), ServerFnError> {
    let cms = use_context::<crate::cms::CmsClient>()
        .ok_or_else(|| ServerFnError::new("CMS client not configured"))?;
    let tag = cms
        .get_tag_by_slug(&slug)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let posts = cms
        .get_posts_by_tag(&slug)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok((tag, posts))
}

#[component]
fn ListSkeleton() -> impl IntoView {
    view! {
        <div class="space-y-4">
            <div class="loading-skeleton h-8 rounded"></div>
            <div class="loading-skeleton h-6 rounded w-3/4"></div>
            <div class="loading-skeleton h-8 rounded"></div>
            <div class="loading-skeleton h-6 rounded w-2/3"></div>
        </div>
    }
}

#[component]
fn PostList(posts: Vec<PostSummary>) -> impl IntoView {
    if posts.is_empty() {
        return view! { <p class="text-muted">"No posts yet."</p> }.into_any();
    }
    view! {
        <div class="space-y-4 section-content">
            {posts
                .into_iter()
                .map(|post| {
                    let date = post
                        .published_at
                        .map(|d| d.format("%b %e %Y").to_string())
                        .unwrap_or_else(|| "draft".to_string());
                    view! {
                        <div class="mb-4 hover:bg-brightBlack/20 p-2 rounded-md transition-colors duration-200">
                            <div class="text-lg leading-tight">
                                "-rw-r--r-- ink "
                                <span>{date}</span>
                                " "
                                <span class="text-blue font-medium">{post.title}</span>
                                {post
                                    .category
                                    .map(|c| {
                                        view! { <span class="ml-2 text-sm text-purple">{c.name}</span> }
                                    })}
                            </div>
                            <div class="mt-1">
                                {post
                                    .tags
                                    .into_iter()
                                    .map(|tag| {
                                        view! {
                                            <A
                                                href=format!("/tags/{}", tag.slug)
                                                attr:class="rounded-md px-2 py-1 bg-brightBlack mr-2 text-sm hover:text-cyan"
                                            >
                                                {tag.name}
                                            </A>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[component]
pub fn PostsPage() -> impl IntoView {
    let posts = Resource::new(|| (), |_| get_posts_server());
    view! {
        <Title text="Posts" />
        <div class="w-full max-w-4xl text-left">
            <div class="bg-black/40 border border-muted/30 p-3 rounded-md font-mono text-sm backdrop-blur-sm mb-6">
                <span class="text-green">$</span>
                <span class="text-foreground ml-2">"ls -lt posts"</span>
            </div>
            <Transition fallback=|| view! { <ListSkeleton /> }>
                {move || Suspend::new(async move {
                    match posts.await {
                        Ok(posts) => view! { <PostList posts /> }.into_any(),
                        Err(e) => {
                            view! { <p class="text-red">{format!("Couldn't load posts: {e}")}</p> }
                                .into_any()
                        }
                    }
                })}
            </Transition>
        </div>
    }
}

#[component]
pub fn TagPostsPage() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.get().get("slug").unwrap_or_default();
    let tagged = Resource::new(slug, get_tag_posts);
    view! {
        <Title text="Tag" />
        <div class="w-full max-w-4xl text-left">
            <div class="bg-black/40 border border-muted/30 p-3 rounded-md font-mono text-sm backdrop-blur-sm mb-6">
                <span class="text-green">$</span>
                <span class="text-foreground ml-2">"grep -l 'tag: "{slug}"' posts/*"</span>
            </div>
            <Transition fallback=|| view! { <ListSkeleton /> }>
                {move || Suspend::new(async move {
                    match tagged.await {
                        Ok((tag, posts)) => {
                            view! {
                                <h1 class="font-bold text-2xl mb-4">
                                    {format!("#{} ({} posts)", tag.name, tag.post_count)}
                                </h1>
                                <PostList posts />
                            }
                                .into_any()
                        }
                        Err(e) => {
                            view! { <p class="text-red">{format!("Couldn't load tag: {e}")}</p> }
                                .into_any()
                        }
                    }
                })}
            </Transition>
            <A href="/tags" attr:class="text-cyan hover:text-brightCyan">
                "← all tags"
            </A>
        </div>
    }
}
