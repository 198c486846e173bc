use leptos::{ev::MouseEvent, html, prelude::*, server_fn::codec::GetUrl};
use leptos_meta::Title;
use leptos_use::{use_element_bounding, UseElementBoundingReturn};

use crate::chart::{
    build_display_entries, place_tooltip, sector_path, sector_spans, CategoryDisplayEntry,
    CategoryRecord, DonutLayout, SectorInteractionController, TooltipPlacement,
    AUTO_CYCLE_INTERVAL, LEAVE_DEBOUNCE, TOOLTIP_WIDTH,
};

#[server(input = GetUrl)]
pub async fn get_category_distribution() -> Result<Vec<CategoryRecord>, ServerFnError> {
    let cms = use_context::<crate::cms::CmsClient>()
        .ok_or_else(|| ServerFnError::new("CMS client not configured"))?;
    let categories = cms
        .get_categories()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(categories.iter().map(|c| c.to_record()).collect())
}

#[server(input = GetUrl)]
pub async fn get_tag_distribution() -> Result<Vec<CategoryRecord>, ServerFnError> {
    let cms = use_context::<crate::cms::CmsClient>()
        .ok_or_else(|| ServerFnError::new("CMS client not configured"))?;
    let tags = cms
        .get_tags()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    Ok(tags.iter().map(|t| t.to_record()).collect())
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let records = Resource::new(|| (), |_| get_category_distribution());
    view! {
        <Title text="Categories" />
        <PageHeading command="ls categories | wc -l" title="Categories" />
        <Transition fallback=|| view! { <ChartSkeleton /> }>
            {move || Suspend::new(async move {
                view! { <DistributionSection records=records.await kind="category" /> }
            })}
        </Transition>
    }
}

#[component]
pub fn TagsPage() -> impl IntoView {
    let records = Resource::new(|| (), |_| get_tag_distribution());
    view! {
        <Title text="Tags" />
        <PageHeading command="ls tags | wc -l" title="Tags" />
        <Transition fallback=|| view! { <ChartSkeleton /> }>
            {move || Suspend::new(async move {
                view! { <DistributionSection records=records.await kind="tag" /> }
            })}
        </Transition>
    }
}

#[component]
fn PageHeading(command: &'static str, title: &'static str) -> impl IntoView {
    view! {
        <div class="w-full max-w-4xl mb-6">
            <h1 class="font-bold text-3xl mb-4">{title}</h1>
            <div class="bg-black/40 border border-muted/30 p-3 rounded-md font-mono text-sm backdrop-blur-sm">
                <span class="text-green">$</span>
                <span class="text-foreground ml-2">{command}</span>
            </div>
        </div>
    }
}

#[component]
fn ChartSkeleton() -> impl IntoView {
    view! {
        <div class="w-full max-w-4xl space-y-4">
            <div class="loading-skeleton h-64 w-64 mx-auto rounded-full"></div>
            <div class="loading-skeleton h-8 rounded"></div>
        </div>
    }
}

#[component]
fn DistributionSection(
    records: Result<Vec<CategoryRecord>, ServerFnError>,
    kind: &'static str,
) -> impl IntoView {
    match records {
        Err(e) => view! {
            <p class="text-red">{format!("Couldn't load {kind} distribution: {e}")}</p>
        }
        .into_any(),
        Ok(records) if records.is_empty() => {
            view! { <p class="text-muted">{format!("No {kind} data yet.")}</p> }.into_any()
        }
        Ok(records) => {
            let total = records
                .iter()
                .fold(0u64, |sum, r| sum.saturating_add(r.count));
            let summary = format!("{} {kind} groups · {total} articles", records.len());
            view! {
                <p class="w-full max-w-4xl mb-4 text-muted">{summary}</p>
                <DistributionChart entries=build_display_entries(&records) kind />
            }
            .into_any()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct SectorView {
    index: usize,
    name: String,
    path: String,
    gradient: String,
    active: bool,
}

fn gradient_id(kind: &str, entry_index: usize) -> String {
    format!("{kind}-gradient-{entry_index}")
}

/// Starts the auto-cycle timer once the chart is mounted in the browser. The
/// interval handle is owned by the cleanup registered alongside it, so it is
/// cleared when the calling component goes away.
fn use_auto_cycle(controller: RwSignal<SectorInteractionController>) {
    // tracks nothing, so this runs once per mount
    Effect::new(move |_| {
        match set_interval_with_handle(
            move || {
                controller.try_update(|c| c.tick());
            },
            AUTO_CYCLE_INTERVAL,
        ) {
            Ok(handle) => on_cleanup(move || handle.clear()),
            Err(e) => log::warn!("auto-cycle timer unavailable: {e:?}"),
        }
    });
}

#[component]
fn DistributionChart(entries: Vec<CategoryDisplayEntry>, kind: &'static str) -> impl IntoView {
    let layout = DonutLayout::default();
    let controller = RwSignal::new(SectorInteractionController::new(entries.clone()));
    let container_ref = NodeRef::<html::Div>::new();
    let UseElementBoundingReturn {
        left, top, width, ..
    } = use_element_bounding(container_ref);

    use_auto_cycle(controller);

    let sectors = Memo::new(move |_| {
        controller.with(|c| {
            let visible = c
                .entries()
                .iter()
                .enumerate()
                .filter(|(_, e)| c.is_visible(&e.name))
                .collect::<Vec<_>>();
            let refs = visible.iter().map(|(_, e)| *e).collect::<Vec<_>>();
            let active = c.state().active_index;
            visible
                .iter()
                .zip(sector_spans(&refs))
                .enumerate()
                .map(|(index, ((entry_index, entry), span))| SectorView {
                    index,
                    name: entry.name.clone(),
                    path: sector_path(&layout, span, active == Some(index)),
                    gradient: gradient_id(kind, *entry_index),
                    active: active == Some(index),
                })
                .collect::<Vec<_>>()
        })
    });

    let tooltip = Memo::new(move |_| {
        controller.with(|c| {
            if !c.state().tooltip_visible {
                return None;
            }
            c.active_entry().map(|e| (e.clone(), c.state().pointer))
        })
    });

    let on_pointer_move = move |ev: MouseEvent| {
        let x = ev.client_x() as f64 - left.get_untracked();
        let y = ev.client_y() as f64 - top.get_untracked();
        controller.update(|c| c.pointer_move(x, y));
    };

    let on_sector_leave = move || {
        if let Some(token) = controller.try_update(|c| c.pointer_leave()) {
            set_timeout(
                move || {
                    controller.try_update(|c| c.settle_leave(token));
                },
                LEAVE_DEBOUNCE,
            );
        }
    };

    let gradients = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            view! {
                <linearGradient id=gradient_id(kind, i) x1="0" y1="0" x2="1" y2="1">
                    <stop offset="0%" stop-color=e.color_primary />
                    <stop offset="100%" stop-color=e.color_secondary />
                </linearGradient>
            }
        })
        .collect_view();

    view! {
        <div class="w-full max-w-4xl flex flex-col items-center">
            <div
                node_ref=container_ref
                class="relative w-full flex justify-center"
                on:mousemove=on_pointer_move
            >
                <svg viewBox=layout.view_box() class="w-80 h-80" role="img">
                    <defs>{gradients}</defs>
                    {move || {
                        sectors
                            .get()
                            .into_iter()
                            .map(|sector| {
                                let index = sector.index;
                                view! {
                                    <path
                                        d=sector.path
                                        fill=format!("url(#{})", sector.gradient)
                                        class=if sector.active {
                                            "cursor-pointer opacity-100 drop-shadow-lg transition-all duration-200"
                                        } else {
                                            "cursor-pointer opacity-80 transition-all duration-200"
                                        }
                                        aria-label=sector.name
                                        on:mouseenter=move |_| {
                                            controller.update(|c| {
                                                c.sector_enter(index);
                                            });
                                        }
                                        on:mouseleave=move |_| on_sector_leave()
                                    />
                                }
                            })
                            .collect_view()
                    }}
                    <ActiveLabel controller layout />
                </svg>
                {move || {
                    tooltip
                        .get()
                        .map(|(entry, pointer)| {
                            let placement = place_tooltip(pointer, width.get(), TOOLTIP_WIDTH);
                            view! { <TooltipPresenter entry placement kind /> }
                        })
                }}
            </div>
            <Legend controller />
        </div>
    }
}

/// Name and share of the highlighted sector, drawn in the donut hole.
#[component]
fn ActiveLabel(
    controller: RwSignal<SectorInteractionController>,
    layout: DonutLayout,
) -> impl IntoView {
    let active = Memo::new(move |_| {
        controller.with(|c| c.active_entry().map(|e| (e.icon, e.name.clone(), e.percentage.clone())))
    });
    view! {
        {move || {
            active
                .get()
                .map(|(icon, name, percentage)| {
                    view! {
                        <text
                            x=layout.cx.to_string()
                            y=(layout.cy - 8.0).to_string()
                            text-anchor="middle"
                            class="fill-current text-sm font-bold"
                        >
                            {format!("{icon} {name}")}
                        </text>
                        <text
                            x=layout.cx.to_string()
                            y=(layout.cy + 14.0).to_string()
                            text-anchor="middle"
                            class="fill-current text-xs opacity-70"
                        >
                            {percentage}
                        </text>
                    }
                })
        }}
    }
}

#[component]
fn TooltipPresenter(
    entry: CategoryDisplayEntry,
    placement: TooltipPlacement,
    kind: &'static str,
) -> impl IntoView {
    let bar = format!(
        "width: {:.2}%; background: linear-gradient(90deg, {}, {});",
        entry.share * 100.0,
        entry.color_primary,
        entry.color_secondary
    );
    view! {
        <div
            class="absolute z-10 pointer-events-none rounded-md border border-muted/30 bg-black/80 p-3 text-sm shadow-xl backdrop-blur-sm"
            style=format!("{} width: {TOOLTIP_WIDTH}px;", placement.style())
        >
            <div class="flex items-center gap-2 mb-1">
                <span class="text-lg">{entry.icon}</span>
                <span class="font-bold truncate">{entry.name}</span>
            </div>
            <div class="text-xs text-muted mb-2">{format!("articles in this {kind}")}</div>
            <div class="flex items-center justify-between mb-2">
                <span class="rounded px-2 py-0.5 bg-cyan/20 text-cyan text-xs">
                    {entry.percentage}
                </span>
                <span>{format!("{} posts", entry.count)}</span>
            </div>
            <div class="h-1.5 w-full rounded bg-brightBlack/40">
                <div class="h-1.5 rounded" style=bar></div>
            </div>
        </div>
    }
}

#[component]
fn Legend(controller: RwSignal<SectorInteractionController>) -> impl IntoView {
    let entries = controller.with_untracked(|c| c.entries().to_vec());
    let highlight = Memo::new(move |_| {
        controller.with(|c| {
            (
                c.visibility().clone(),
                c.active_entry().map(|e| e.name.clone()),
            )
        })
    });

    view! {
        <div class="flex flex-wrap justify-center gap-2 mt-6">
            {entries
                .into_iter()
                .map(|entry| {
                    let name = entry.name.clone();
                    let class = {
                        let name = name.clone();
                        move || {
                            let (visible, active) = highlight.get();
                            let base = "flex items-center gap-1 rounded-md px-2 py-1 text-sm border transition-all duration-200";
                            if !visible.contains(&name) {
                                format!("{base} border-muted/30 opacity-40 line-through")
                            } else if active.as_deref() == Some(name.as_str()) {
                                format!("{base} border-cyan bg-cyan/20")
                            } else {
                                format!("{base} border-muted/30 hover:bg-brightBlack/20")
                            }
                        }
                    };
                    let on_click = {
                        let name = name.clone();
                        move |_| {
                            controller.update(|c| {
                                c.toggle(&name);
                            });
                        }
                    };
                    let on_enter = {
                        let name = name.clone();
                        move |_| {
                            controller.update(|c| {
                                c.legend_enter(&name);
                            });
                        }
                    };
                    view! {
                        <button
                            class=class
                            on:click=on_click
                            on:mouseenter=on_enter
                            on:mouseleave=move |_| controller.update(|c| c.legend_leave())
                        >
                            <span
                                class="inline-block w-3 h-3 rounded-full"
                                style=format!(
                                    "background: linear-gradient(135deg, {}, {});",
                                    entry.color_primary,
                                    entry.color_secondary,
                                )
                            ></span>
                            <span>{entry.icon}</span>
                            <span>{name}</span>
                            <span class="text-muted">{format!("({})", entry.count)}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
