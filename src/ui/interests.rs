/// Interests picker: paginated category list with selection toggles

use crate::catalog::{Category, CategoryCatalog};
use crate::config::ShellConfig;
use crate::error::CatalogError;
use crate::pagination::{PageControl, Paginator};
use crate::storage::PersistentStore;
use patternfly_yew::prelude::*;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct InterestsPageProps {
    pub store: PersistentStore,
    pub config: ShellConfig,
}

#[function_component(InterestsPage)]
pub fn interests_page(props: &InterestsPageProps) -> Html {
    let catalog = {
        let store = props.store.clone();
        let config = props.config.clone();
        use_mut_ref(move || CategoryCatalog::with_config(store, &config))
    };
    let items = use_state(Vec::<Category>::new);
    let pager = {
        let config = props.config.clone();
        use_state(move || Paginator::new(&config, 0))
    };
    let loading = use_state(|| true);
    let notice = use_state(|| None::<String>);
    let failure = use_state(|| None::<String>);

    // Load (or generate) the catalog on mount
    {
        let catalog = catalog.clone();
        let config = props.config.clone();
        let items = items.clone();
        let pager = pager.clone();
        let loading = loading.clone();
        let failure = failure.clone();

        use_effect_with((), move |_| {
            let loaded = catalog.borrow_mut().load().map(|list| list.to_vec());
            match loaded {
                Ok(list) => {
                    pager.set(Paginator::new(&config, list.len()));
                    items.set(list);
                }
                Err(e) => failure.set(Some(e.to_string())),
            }
            loading.set(false);
            || ()
        });
    }

    let on_toggle = {
        let catalog = catalog.clone();
        let items = items.clone();
        let notice = notice.clone();
        let failure = failure.clone();

        Callback::from(move |id: String| {
            let result = catalog.borrow_mut().toggle(&id);
            match result {
                Ok(category) => {
                    notice.set(Some(category.selection_message()));
                    items.set(catalog.borrow().categories().to_vec());
                }
                Err(CatalogError::NotFound(id)) => {
                    log::warn!("ignoring toggle of unknown category {}", id);
                }
                Err(e) => failure.set(Some(e.to_string())),
            }
        })
    };

    let navigate = {
        let pager = pager.clone();
        move |step: fn(&mut Paginator) -> usize| {
            let pager = pager.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*pager).clone();
                step(&mut next);
                pager.set(next);
            })
        }
    };

    let on_jump = {
        let pager = pager.clone();
        move |page: usize| {
            let pager = pager.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*pager).clone();
                match next.jump(page) {
                    Ok(_) => pager.set(next),
                    Err(e) => log::warn!("{}", e),
                }
            })
        }
    };

    if *loading {
        return html! {
            <div class="loading-text-center">
                <Spinner />
            </div>
        };
    }

    let selected: Vec<&Category> = items.iter().filter(|c| c.selected).collect();
    let visible = pager.visible(items.as_slice());

    html! {
        <div class="interests-card">
            <h2 class="interests-title">{"Please mark your interests!"}</h2>
            <p class="interests-caption">{"We will keep you notified."}</p>

            if let Some(message) = (*failure).clone() {
                <Alert r#type={AlertType::Danger} title={"Could not save your interests"} inline={true}>
                    {message}
                </Alert>
            }

            <div class="interests-summary">
                <h3>{"My saved interests!"}</h3>
                <span>{format!("{} selected", selected.len())}</span>
            </div>

            <div class="interests-list">
                {for visible.iter().map(|category| {
                    let id = category.id.clone();
                    let onclick = on_toggle.reform(move |_: MouseEvent| id.clone());
                    html! {
                        <div class="interest-item" key={category.id.clone()} {onclick}>
                            <span class={if category.selected { "checkbox checked" } else { "checkbox" }}>
                                {if category.selected { "✓" } else { "" }}
                            </span>
                            <span class="interest-label">{&category.label}</span>
                        </div>
                    }
                })}
            </div>

            if !selected.is_empty() {
                <div class="selected-box">
                    <p>{"Selected Categories:"}</p>
                    <div class="selected-chips">
                        {for selected.iter().map(|category| html! {
                            <span class="chip" key={category.id.clone()}>{&category.label}</span>
                        })}
                    </div>
                </div>
            }

            if let Some(message) = (*notice).clone() {
                <p class="interests-notice">{message}</p>
            }

            <div class="pager">
                <button onclick={navigate(Paginator::first)} disabled={pager.is_first()}>{"<<"}</button>
                <button onclick={navigate(Paginator::prev)} disabled={pager.is_first()}>{"<"}</button>
                {for pager.controls().into_iter().map(|control| match control {
                    PageControl::Page(page) => html! {
                        <button
                            class={if page == pager.page_index() { "page current" } else { "page" }}
                            onclick={on_jump(page)}
                        >
                            {control.to_string()}
                        </button>
                    },
                    PageControl::Ellipsis => html! {
                        <span class="page">{control.to_string()}</span>
                    },
                })}
                <button onclick={navigate(Paginator::next)} disabled={pager.is_last()}>{">"}</button>
                <button onclick={navigate(Paginator::last)} disabled={pager.is_last()}>{">>"}</button>
            </div>
        </div>
    }
}
