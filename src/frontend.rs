use gloo::events::EventListener;
use js_sys::{Array, Date, Function, Reflect};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Node, ScrollBehavior, ScrollToOptions, Storage,
};
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::content::{DownloadOption, TimelineEntry, CONTENT_TABLE, DOWNLOAD_OPTIONS};
use crate::error::StorageError;
use crate::i18n::{
    entry_key, segments, Language, LinkIcon, Localizer, ResolveOptions, Resolved, Segment,
};
use crate::log::{log_event, LogLevel};
use crate::menu::MenuState;
use crate::modal::{ModalAction, ModalState, ProjectDetails, ScrollLock, ScrollLockGuard};
use crate::reveal::{RevealOptions, RevealState};
use crate::scroll::{ScrollMetrics, ScrollState};
use crate::theme::{PreferenceStore, Theme, ThemeController, ThemeSurface};
use crate::timeline::{build_sections, nav_years, year_anchor, PlacedCard, YearSection};

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

struct BrowserStore;

impl PreferenceStore for BrowserStore {
    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StorageError::WriteRejected { key: key.to_string() })
    }
}

fn system_prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn browser_language() -> Option<String> {
    window()?.navigator().language()
}

fn document_root() -> Option<Element> {
    window()?.document()?.document_element()
}

fn document_body() -> Option<HtmlElement> {
    window()?.document()?.body()
}

fn apply_theme(theme: Theme) {
    if let Some(root) = document_root() {
        let _ = root.set_attribute("data-theme", theme.as_str());
        let _ = root
            .class_list()
            .toggle_with_force("dark", matches!(theme, Theme::Dark));
    }
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    // The browser runs the update callback after this function returns.
    let callback = Closure::once_into_js(move || {
        apply_theme(theme);
    });

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

struct DocumentRoot;

impl ThemeSurface for DocumentRoot {
    fn apply(&self, theme: Theme, animate: bool) {
        if animate {
            apply_theme_with_transition(theme);
        } else {
            apply_theme(theme);
        }
    }
}

#[derive(Clone, Copy)]
struct BodyScrollLock;

impl ScrollLock for BodyScrollLock {
    fn lock(&self) {
        if let Some(body) = document_body() {
            let _ = body.style().set_property("overflow", "hidden");
        }
    }

    fn unlock(&self) {
        if let Some(body) = document_body() {
            let _ = body.style().remove_property("overflow");
        }
    }
}

fn read_scroll_metrics() -> ScrollMetrics {
    let Some(root) = document_root() else {
        return ScrollMetrics::default();
    };

    ScrollMetrics {
        scroll_top: f64::from(root.scroll_top()),
        scroll_height: f64::from(root.scroll_height()),
        client_height: f64::from(root.client_height()),
    }
}

fn scroll_to_top() {
    if let Some(win) = window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
    }
}

fn set_document_language(language: Language) {
    if let Some(root) = document_root() {
        let _ = root.set_attribute("lang", language.code());
    }
}

fn pointer_inside(region: &NodeRef, event: &Event) -> bool {
    let Some(region) = region.cast::<Node>() else {
        return false;
    };

    event
        .target()
        .and_then(|target| target.dyn_into::<Node>().ok())
        .map(|target| region.contains(Some(&target)))
        .unwrap_or(false)
}

/// Document-level listener that exists only while `active` is true and is
/// removed when it flips back or the component unmounts.
#[hook]
fn use_document_listener<F: Fn(&Event) + 'static>(active: bool, event_type: &'static str, handler: F) {
    use_effect_with(active, move |active| {
        let listener = if *active {
            window()
                .and_then(|w| w.document())
                .map(|document| EventListener::new(&document, event_type, handler))
        } else {
            None
        };
        move || drop(listener)
    });
}

#[hook]
fn use_scroll_state() -> ScrollState {
    let state = use_state_eq(|| ScrollState::from_metrics(read_scroll_metrics()));

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "scroll", move |_event: &Event| {
                    state.set(ScrollState::from_metrics(read_scroll_metrics()));
                })
            });
            move || drop(listener)
        });
    }

    *state
}

type IntersectionCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn observe_reveal(
    element: &Element,
    options: RevealOptions,
    on_reveal: impl Fn() + 'static,
) -> Option<(IntersectionObserver, IntersectionCallback)> {
    let mut state = RevealState::Pending;
    let callback = IntersectionCallback::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let next = state.observe(entry.is_intersecting(), entry.intersection_ratio(), &options);
            if next.is_revealed() && !state.is_revealed() {
                state = next;
                observer.unobserve(&entry.target());
                on_reveal();
            }
        }
    });

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;
    observer.observe(element);

    Some((observer, callback))
}

#[hook]
fn use_reveal(target: NodeRef, label: String) -> RevealState {
    let state = use_state_eq(RevealState::default);

    {
        let state = state.clone();
        use_effect_with(target, move |target| {
            let reveal = {
                let state = state.clone();
                move || {
                    log_event(LogLevel::Debug, "section_revealed", serde_json::json!({ "section": label }));
                    state.set(RevealState::Revealed);
                }
            };
            let observed = target
                .cast::<Element>()
                .and_then(|element| observe_reveal(&element, RevealOptions::default(), reveal));
            if observed.is_none() {
                state.set(RevealState::Revealed);
            }
            move || {
                if let Some((observer, _callback)) = observed {
                    observer.disconnect();
                }
            }
        });
    }

    *state
}

#[hook]
fn use_localizer() -> Localizer {
    use_context::<Localizer>().unwrap_or_else(|| Localizer::new(Language::En))
}

impl Reducible for ModalState<TimelineEntry> {
    type Action = ModalAction<TimelineEntry>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

enum MenuEvent {
    Toggle,
    Select,
    PointerDown { inside: bool },
}

impl Reducible for MenuState {
    type Action = MenuEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            MenuEvent::Toggle => self.toggle(),
            MenuEvent::Select => self.select(),
            MenuEvent::PointerDown { inside } => self.pointer_down(inside),
        };
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct DownloadMenuProps {
    options: &'static [DownloadOption],
}

#[function_component(DownloadMenu)]
fn download_menu(props: &DownloadMenuProps) -> Html {
    let localizer = use_localizer();
    let menu = use_reducer_eq(MenuState::default);
    let region = use_node_ref();

    {
        let region = region.clone();
        let dispatcher = menu.dispatcher();
        use_document_listener(menu.listens_for_outside_clicks(), "mousedown", move |event: &Event| {
            dispatcher.dispatch(MenuEvent::PointerDown {
                inside: pointer_inside(&region, event),
            });
        });
    }

    let on_trigger = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.dispatch(MenuEvent::Toggle))
    };

    let on_select = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.dispatch(MenuEvent::Select))
    };

    html! {
        <div class="download-menu" ref={region}>
            <button
                class="download-trigger"
                type="button"
                aria-haspopup="menu"
                aria-expanded={menu.is_open().to_string()}
                onclick={on_trigger}
            >
                <span aria-hidden="true">{"⤓"}</span>
                <span class="download-label">{localizer.text("nav.download")}</span>
                <span class={classes!("chevron", menu.is_open().then_some("is-open"))} aria-hidden="true">{"▾"}</span>
            </button>
            if menu.is_open() {
                <div class="download-options" role="menu">
                    { for props.options.iter().map(|option| html! {
                        <a
                            class="download-option"
                            role="menuitem"
                            href={option.file}
                            download=""
                            onclick={on_select.clone()}
                        >
                            <span class="file-icon" aria-hidden="true">{"▤"}</span>
                            {localizer.text(option.label_key)}
                        </a>
                    }) }
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NavBarProps {
    years: Vec<i32>,
    on_toggle_theme: Callback<()>,
    on_toggle_language: Callback<()>,
}

#[function_component(NavBar)]
fn nav_bar(props: &NavBarProps) -> Html {
    let localizer = use_localizer();
    let theme = use_context::<Theme>().unwrap_or(Theme::Light);

    let on_theme = {
        let on_toggle_theme = props.on_toggle_theme.clone();
        Callback::from(move |_: MouseEvent| on_toggle_theme.emit(()))
    };

    let on_language = {
        let on_toggle_language = props.on_toggle_language.clone();
        Callback::from(move |_: MouseEvent| on_toggle_language.emit(()))
    };

    html! {
        <nav class="site-nav">
            <div class="nav-inner">
                <a class="brand" href="#top">{SiteConfig::current().owner_name.clone()}</a>
                <ul class="year-links">
                    { for props.years.iter().map(|year| html! {
                        <li><a href={format!("#{}", year_anchor(*year))}>{year.to_string()}</a></li>
                    }) }
                </ul>
                <div class="nav-actions">
                    <DownloadMenu options={DOWNLOAD_OPTIONS} />
                    <button
                        class="language-toggle"
                        type="button"
                        aria-label={localizer.text("nav.language")}
                        onclick={on_language}
                    >
                        {localizer.language().switch_label()}
                    </button>
                    <button
                        class="theme-toggle"
                        type="button"
                        aria-label={localizer.text(theme.toggle_label_key())}
                        aria-pressed={theme.pressed().to_string()}
                        onclick={on_theme}
                    >
                        <span aria-hidden="true">{theme.icon()}</span>
                    </button>
                </div>
            </div>
        </nav>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    let localizer = use_localizer();

    html! {
        <header id="top" class="hero">
            <h1 class="hero-name">{localizer.text("hero.name")}</h1>
            <p class="hero-role">{localizer.text("hero.role")}</p>
            <p class="hero-about">
                { for segments(&localizer.text("hero.about")).into_iter().map(|segment| match segment {
                    Segment::Plain(text) => html! { <>{text}</> },
                    Segment::Emphasis(text) => html! { <strong>{text}</strong> },
                }) }
            </p>
            <ul class="hero-facts">
                <li>{localizer.text("hero.degree")}</li>
                <li>{localizer.text("hero.location")}</li>
            </ul>
            <h2 class="hero-journey">{localizer.text("hero.journey")}</h2>
            <div class="scroll-cue" aria-hidden="true">
                <span>{localizer.text("hero.scrollDown")}</span>
                <span>{"⌄"}</span>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct TimelineCardProps {
    card: PlacedCard,
    revealed: bool,
    on_view_details: Callback<TimelineEntry>,
}

#[function_component(TimelineCard)]
fn timeline_card(props: &TimelineCardProps) -> Html {
    let localizer = use_localizer();
    let card = props.card;
    let entry = card.entry;
    let year = entry.year.to_string();
    let title = localizer.text_with(&entry_key(entry.key, "title"), &[("year", year.as_str())]);
    let description = localizer.text(&entry_key(entry.key, "description"));
    let items = match localizer.resolve(&entry_key(entry.key, "items"), ResolveOptions { as_list: true }) {
        Resolved::List(items) => items,
        Resolved::Text(_) => Vec::new(),
    };

    let on_click = {
        let on_view_details = props.on_view_details.clone();
        Callback::from(move |_: MouseEvent| on_view_details.emit(entry))
    };

    html! {
        <div class={classes!(card.side.row_class(), props.revealed.then_some("is-revealed"))}>
            <div class="card-column">
                <article class={classes!("card", card.side.enter_class())}>
                    <h3 class="card-title">{title.clone()}</h3>
                    <p class="card-description">{description}</p>
                    <ul class="card-items">
                        { for items.into_iter().map(|item| html! {
                            <li>
                                <span class="check" aria-hidden="true">{"✓"}</span>
                                <span>{item}</span>
                            </li>
                        }) }
                    </ul>
                    if !entry.is_placeholder() {
                        <button class="details-button" type="button" onclick={on_click}>
                            {localizer.text("timeline.viewDetails")}
                            <span class="details-arrow" aria-hidden="true">{"→"}</span>
                        </button>
                    }
                </article>
            </div>
            <div class="card-column">
                if let Some(image) = entry.image {
                    <figure class="card-media">
                        <img src={image} alt={title.clone()} loading="lazy" />
                    </figure>
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct YearSectionViewProps {
    section: YearSection,
    on_view_details: Callback<TimelineEntry>,
}

#[function_component(YearSectionView)]
fn year_section_view(props: &YearSectionViewProps) -> Html {
    let node = use_node_ref();
    let reveal = use_reveal(node.clone(), props.section.anchor_id());

    html! {
        <section id={props.section.anchor_id()} class={classes!("year-section", reveal.class())} ref={node}>
            <div class="year-marker">
                <span>{props.section.year.to_string()}</span>
            </div>
            <div class="year-cards">
                { for props.section.cards.iter().map(|card| html! {
                    <TimelineCard
                        key={card.index}
                        card={*card}
                        revealed={reveal.is_revealed()}
                        on_view_details={props.on_view_details.clone()}
                    />
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectModalProps {
    entry: Option<TimelineEntry>,
    on_close: Callback<()>,
}

#[function_component(ProjectModal)]
fn project_modal(props: &ProjectModalProps) -> Html {
    let localizer = use_localizer();
    let is_open = props.entry.is_some();

    use_effect_with(is_open, |is_open| {
        let scroll_lock = is_open.then(|| ScrollLockGuard::acquire(BodyScrollLock));
        move || drop(scroll_lock)
    });

    {
        let on_close = props.on_close.clone();
        use_document_listener(is_open, "keydown", move |event: &Event| {
            if event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|event| event.key() == "Escape")
            {
                on_close.emit(());
            }
        });
    }

    let Some(entry) = props.entry else {
        return Html::default();
    };
    let details = ProjectDetails::resolve(&entry, &localizer);

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-layer" role="dialog" aria-modal="true" aria-labelledby="modal-title">
            <div class="modal-backdrop" onclick={on_close.clone()}></div>
            <div class="modal-panel">
                <div class="modal-media">
                    if let Some(image) = details.image {
                        <img src={image} alt={details.title.clone()} />
                    }
                    <button
                        class="modal-close"
                        type="button"
                        aria-label={localizer.text("timeline.close")}
                        onclick={on_close}
                    >
                        {"✕"}
                    </button>
                </div>
                <div class="modal-body">
                    <h2 id="modal-title" class="modal-title">{details.title.clone()}</h2>
                    <p class="modal-details">{details.details.clone()}</p>
                    <h3 class="modal-features-heading">{localizer.text("timeline.keyFeatures")}</h3>
                    <div class="modal-features">
                        { for details.features.iter().map(|feature| html! {
                            <div class="modal-feature">{feature.clone()}</div>
                        }) }
                    </div>
                    <div class="modal-links">
                        { for details.links.iter().map(|link| html! {
                            <a
                                class="modal-link"
                                href={link.url.clone()}
                                target="_blank"
                                rel="noopener noreferrer"
                            >
                                <span class="link-icon" aria-hidden="true">{LinkIcon::for_label(&link.label).glyph()}</span>
                                {link.label.clone()}
                            </a>
                        }) }
                    </div>
                </div>
            </div>
        </div>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let localizer = use_localizer();
    let config = SiteConfig::current();
    let year = Date::new_0().get_full_year().to_string();
    let copyright = localizer.text_with(
        "footer.copyright",
        &[("year", year.as_str()), ("name", config.owner_name.as_str())],
    );

    html! {
        <footer class="site-footer">
            <h2>{localizer.text("footer.connect")}</h2>
            <ul class="contact-list">
                if let Some(email) = config.contact_email.as_deref() {
                    <li>
                        <span class="muted">{localizer.text("footer.email")}</span>
                        <a href={format!("mailto:{email}")}>{email}</a>
                    </li>
                }
                if let Some(phone) = config.contact_phone.as_deref() {
                    <li>
                        <span class="muted">{localizer.text("footer.phone")}</span>
                        <a href={format!("tel:{phone}")}>{phone}</a>
                    </li>
                }
            </ul>
            <p class="muted">{localizer.text("footer.builtWith")}</p>
            <p class="muted">{copyright}</p>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
struct BackToTopProps {
    visible: bool,
}

#[function_component(BackToTop)]
fn back_to_top(props: &BackToTopProps) -> Html {
    let localizer = use_localizer();
    let onclick = Callback::from(|_: MouseEvent| scroll_to_top());

    html! {
        <button
            class={classes!("back-to-top", props.visible.then_some("is-visible"))}
            type="button"
            aria-label={localizer.text("backToTop")}
            tabindex={if props.visible { "0" } else { "-1" }}
            {onclick}
        >
            <span aria-hidden="true">{"↑"}</span>
        </button>
    }
}

#[function_component(App)]
fn app() -> Html {
    let controller = use_mut_ref(|| ThemeController::new(BrowserStore, DocumentRoot, system_prefers_dark));
    let theme = use_state_eq(|| controller.borrow().theme());
    let language = use_state_eq(|| Language::detect(browser_language().as_deref()));
    let modal = use_reducer_eq(ModalState::<TimelineEntry>::default);
    let scroll = use_scroll_state();
    let sections = use_memo((), |_| {
        build_sections(CONTENT_TABLE, SiteConfig::current().gap_policy)
    });
    let localizer = Localizer::new(*language);

    {
        let section_count = sections.len();
        use_effect_with((), move |_| {
            log_event(
                LogLevel::Info,
                "app_mounted",
                serde_json::json!({ "sections": section_count }),
            );
            || ()
        });
    }

    use_effect_with(*language, |language| {
        set_document_language(*language);
        || ()
    });

    let on_toggle_theme = {
        let controller = controller.clone();
        let theme = theme.clone();
        Callback::from(move |_: ()| {
            let next = controller.borrow_mut().toggle();
            theme.set(next);
        })
    };

    let on_toggle_language = {
        let language = language.clone();
        Callback::from(move |_: ()| {
            let next = (*language).toggled();
            log_event(
                LogLevel::Info,
                "language_changed",
                serde_json::json!({ "language": next.code() }),
            );
            language.set(next);
        })
    };

    let on_view_details = {
        let modal = modal.clone();
        Callback::from(move |entry: TimelineEntry| {
            log_event(
                LogLevel::Info,
                "modal_opened",
                serde_json::json!({ "entry": entry.key, "year": entry.year }),
            );
            modal.dispatch(ModalAction::ViewDetails(entry));
        })
    };

    let on_close_modal = {
        let modal = modal.clone();
        Callback::from(move |_: ()| {
            if modal.is_open() {
                log_event(LogLevel::Info, "modal_closed", serde_json::json!({}));
            }
            modal.dispatch(ModalAction::Close);
        })
    };

    html! {
        <ContextProvider<Localizer> context={localizer}>
            <ContextProvider<Theme> context={*theme}>
                <div
                    class="progress-bar"
                    style={scroll.progress_style()}
                    role="progressbar"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow={format!("{:.0}", scroll.progress_percent)}
                ></div>
                <NavBar
                    years={nav_years(&sections)}
                    on_toggle_theme={on_toggle_theme}
                    on_toggle_language={on_toggle_language}
                />
                <Hero />
                <main class="timeline">
                    <div class="timeline-axis" aria-hidden="true"></div>
                    { for sections.iter().map(|section| html! {
                        <YearSectionView
                            key={section.year}
                            section={section.clone()}
                            on_view_details={on_view_details.clone()}
                        />
                    }) }
                </main>
                <Footer />
                <ProjectModal entry={modal.selected().copied()} on_close={on_close_modal} />
                <BackToTop visible={scroll.past_threshold} />
            </ContextProvider<Theme>>
        </ContextProvider<Localizer>>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
