#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

use finnvest_frontend::components::waitlist_form::WaitlistForm;
use finnvest_frontend::config::LandingConfig;
use finnvest_frontend::dom_is_parsed;
use finnvest_frontend::error::SubmitError;
use finnvest_frontend::pages::landing::LandingPage;
use finnvest_frontend::utils::api::{EmailAddress, WaitlistClient};
use finnvest_frontend::utils::ticker::Ticker;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

wasm_bindgen_test_configure!(run_in_browser);

const NAV: &str = r##"
    <nav>
        <button class="hamburger"></button>
        <ul class="nav-menu"><li><a class="nav-link" href="#features">Features</a></li></ul>
    </nav>
"##;

const WAITLIST: &str = r#"
    <div id="successNotification"></div>
    <section class="hero-section">
        <form id="heroForm">
            <input id="heroEmail" type="email">
            <button type="submit">Join</button>
        </form>
    </section>
"#;

fn fixture(html: &str) -> (Window, Document) {
    let window = web_sys::window().unwrap();
    let document = window.document().unwrap();
    window.scroll_to_with_x_and_y(0.0, 0.0);
    document.body().unwrap().set_inner_html(html);
    (window, document)
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> T {
    document.get_element_by_id(id).unwrap().dyn_into::<T>().unwrap()
}

fn first(document: &Document, selector: &str) -> Element {
    document.query_selector(selector).unwrap().unwrap()
}

fn count(document: &Document, selector: &str) -> u32 {
    document.query_selector_all(selector).unwrap().length()
}

fn submit(document: &Document, form_selector: &str) {
    first(document, form_selector)
        .dispatch_event(&Event::new("submit").unwrap())
        .unwrap();
}

struct OfflineClient;

impl WaitlistClient for OfflineClient {
    async fn join(&self, _email: &EmailAddress) -> Result<(), SubmitError> {
        TimeoutFuture::new(50).await;
        Err(SubmitError::Network("offline".to_string()))
    }
}

fn quick_config() -> LandingConfig {
    let mut config = LandingConfig::default();
    config.waitlist.endpoint = None;
    config
}

#[wasm_bindgen_test]
fn mounts_without_mobile_nav() {
    let (window, _document) = fixture(WAITLIST);
    let page = LandingPage::mount(window, quick_config()).unwrap();

    let mounted = page.mounted();
    assert!(!mounted.nav);
    assert!(page.nav().is_none());
    assert_eq!(mounted.forms, 1);
    assert!(mounted.notification);
    assert!(mounted.particles);
    assert!(mounted.observers >= 1);
}

#[wasm_bindgen_test]
fn hamburger_toggles_menu_and_scroll_lock() {
    let (window, document) = fixture(&format!("{NAV}{WAITLIST}"));
    let page = LandingPage::mount(window, quick_config()).unwrap();
    let hamburger: HtmlElement = first(&document, ".hamburger").dyn_into().unwrap();
    let menu = first(&document, ".nav-menu");
    let body = document.body().unwrap();

    hamburger.click();
    assert!(page.nav().unwrap().is_open());
    assert!(menu.class_list().contains("active"));
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "hidden");

    let link: HtmlElement = first(&document, ".nav-link").dyn_into().unwrap();
    link.click();
    assert!(!page.nav().unwrap().is_open());
    assert!(!menu.class_list().contains("active"));
    assert_eq!(body.style().get_property_value("overflow").unwrap(), "");

    hamburger.click();
    body.click();
    assert!(!page.nav().unwrap().is_open(), "outside click closes the menu");
}

#[wasm_bindgen_test]
async fn simulated_signup_completes_after_delay() {
    let (window, document) = fixture(WAITLIST);
    let page = LandingPage::mount(window, quick_config()).unwrap();
    let input: HtmlInputElement = by_id(&document, "heroEmail");
    let button: HtmlButtonElement = first(&document, "#heroForm button").dyn_into().unwrap();
    let toast = first(&document, "#successNotification");

    input.set_value("ana@finnvest.io");
    submit(&document, "#heroForm");
    assert!(button.disabled());
    assert!(page.forms()[0].is_submitting());

    TimeoutFuture::new(1000).await;
    assert!(!toast.class_list().contains("show"));
    assert_eq!(input.value(), "ana@finnvest.io");

    TimeoutFuture::new(800).await;
    assert!(toast.class_list().contains("show"));
    assert_eq!(input.value(), "");
    assert!(!button.disabled());
    assert_eq!(button.inner_html(), "Join");

    page.close_notification();
    assert!(!toast.class_list().contains("show"));
}

#[wasm_bindgen_test]
async fn dismissed_toast_is_not_touched_by_old_timer() {
    let (window, document) = fixture(WAITLIST);
    let mut config = quick_config();
    config.notification_ms = 300;
    let page = LandingPage::mount(window, config).unwrap();
    let toast = first(&document, "#successNotification");
    let notification = page.context().notification.clone().unwrap();

    notification.show().unwrap();
    TimeoutFuture::new(100).await;
    notification.dismiss().unwrap();
    assert!(!notification.is_visible());

    TimeoutFuture::new(150).await;
    notification.show().unwrap();
    TimeoutFuture::new(200).await;
    assert!(toast.class_list().contains("show"), "first timer must not hide the second show");

    TimeoutFuture::new(200).await;
    assert!(!toast.class_list().contains("show"));
}

#[wasm_bindgen_test]
async fn stats_count_up_when_visible() {
    let (window, document) = fixture(
        r#"<section class="stats-section" style="height: 40px">
            <span class="stat-number" data-target="1500">0</span>
        </section>"#,
    );
    let mut config = quick_config();
    config.counters.duration_ms = 200;
    let _page = LandingPage::mount(window, config).unwrap();

    TimeoutFuture::new(800).await;
    assert_eq!(
        first(&document, ".stat-number").text_content().as_deref(),
        Some("1,500")
    );
}

#[wasm_bindgen_test]
fn document_is_ready_under_test() {
    let (_window, document) = fixture("");
    assert!(dom_is_parsed(&document.ready_state()));
}

#[wasm_bindgen_test]
async fn failed_signup_keeps_email_and_flags_form() {
    let (_window, document) = fixture(WAITLIST);
    let form = WaitlistForm::bind(&document, "heroForm", Rc::new(OfflineClient), None, "Sending")
        .unwrap()
        .unwrap();
    let input: HtmlInputElement = by_id(&document, "heroEmail");
    let button: HtmlButtonElement = first(&document, "#heroForm button").dyn_into().unwrap();

    input.set_value("ana@finnvest.io");
    submit(&document, "#heroForm");
    assert!(form.is_submitting());
    assert!(button.disabled());
    assert_eq!(button.inner_html(), "Sending");

    TimeoutFuture::new(200).await;
    assert!(!form.is_submitting());
    assert!(first(&document, "#heroForm").class_list().contains("form-error"));
    assert_eq!(input.value(), "ana@finnvest.io");
    assert_eq!(button.inner_html(), "Join");
    assert!(!button.disabled());
}

#[wasm_bindgen_test]
async fn invalid_email_is_refused_before_sending() {
    let (window, document) = fixture(WAITLIST);
    let page = LandingPage::mount(window, quick_config()).unwrap();
    let input: HtmlInputElement = by_id(&document, "heroEmail");
    let button: HtmlButtonElement = first(&document, "#heroForm button").dyn_into().unwrap();

    input.set_value("not-an-email");
    submit(&document, "#heroForm");
    assert!(!button.disabled());
    assert!(!page.forms()[0].is_submitting());
    assert!(first(&document, "#heroForm").class_list().contains("form-error"));

    TimeoutFuture::new(1800).await;
    assert!(!first(&document, "#successNotification").class_list().contains("show"));
    assert_eq!(button.inner_html(), "Join");
}

#[wasm_bindgen_test]
async fn ticker_stops_on_cancel_and_drop() {
    let steps = Rc::new(Cell::new(0u32));
    let ticker = Ticker::start(20, {
        let steps = steps.clone();
        move || {
            steps.set(steps.get() + 1);
            ControlFlow::Continue(())
        }
    });
    TimeoutFuture::new(90).await;
    assert!(ticker.is_running());
    ticker.cancel();
    assert!(!ticker.is_running());
    let seen = steps.get();
    assert!(seen >= 1);
    TimeoutFuture::new(100).await;
    assert_eq!(steps.get(), seen);

    let dropped = Rc::new(Cell::new(0u32));
    drop(Ticker::start(20, {
        let dropped = dropped.clone();
        move || {
            dropped.set(dropped.get() + 1);
            ControlFlow::Continue(())
        }
    }));
    TimeoutFuture::new(100).await;
    assert_eq!(dropped.get(), 0);
}

#[wasm_bindgen_test]
async fn ticker_ends_when_step_breaks() {
    let steps = Rc::new(Cell::new(0u32));
    let ticker = Ticker::start(10, {
        let steps = steps.clone();
        move || {
            steps.set(steps.get() + 1);
            if steps.get() == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    });
    TimeoutFuture::new(200).await;
    assert_eq!(steps.get(), 3);
    assert!(!ticker.is_running());
}

#[wasm_bindgen_test]
async fn hero_title_types_and_stops_once_removed() {
    const TITLE: &str = "Invest smarter with FinnVest";
    let (window, document) = fixture(&format!(r#"<h1 class="hero-title">{TITLE}</h1>"#));
    let _page = LandingPage::mount(window, quick_config()).unwrap();
    let title = first(&document, ".hero-title");

    TimeoutFuture::new(250).await;
    let typed = title.text_content().unwrap_or_default();
    assert!(!typed.is_empty(), "typing has started");
    assert!(TITLE.starts_with(&typed));
    assert!(typed.len() < TITLE.len(), "typing is still running");

    title.remove();
    let at_removal = title.text_content().unwrap_or_default();
    TimeoutFuture::new(400).await;
    assert_eq!(title.text_content().unwrap_or_default(), at_removal);
}

#[wasm_bindgen_test]
async fn dropping_the_page_clears_particles() {
    let (window, document) = fixture(WAITLIST);
    let mut config = quick_config();
    config.particles.interval_ms = 30;
    let page = LandingPage::mount(window, config).unwrap();

    TimeoutFuture::new(150).await;
    let live = page.particles().unwrap().live_count() as u32;
    assert!(live >= 1);
    let before = count(&document, ".particle");
    assert!(before >= live);

    drop(page);
    assert_eq!(count(&document, ".particle"), before - live);
}

#[wasm_bindgen_test]
fn progress_bar_is_created_and_follows_scroll() {
    let (window, document) = fixture(&format!(r#"{WAITLIST}<div style="height: 5000px"></div>"#));
    assert_eq!(count(&document, ".scroll-progress"), 0);
    let _page = LandingPage::mount(window.clone(), quick_config()).unwrap();

    let bar: HtmlElement = first(&document, ".scroll-progress").dyn_into().unwrap();
    assert_eq!(count(&document, ".scroll-progress"), 1);
    assert_eq!(bar.parent_element(), document.body().map(Into::into));

    window.scroll_to_with_x_and_y(0.0, 1000.0);
    window.dispatch_event(&Event::new("scroll").unwrap()).unwrap();
    let width = bar.style().get_property_value("width").unwrap();
    assert!(width.ends_with('%'), "width was {width:?}");
    assert_ne!(width, "0%");

    window.scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
async fn anchor_reads_href_at_click_time() {
    let (window, document) = fixture(
        r##"<a id="jump" href="#top">Jump</a>
        <div id="top"></div>
        <div style="height: 4000px"></div>
        <section id="far" style="height: 200px">Far</section>
        <div style="height: 2000px"></div>"##,
    );
    let _page = LandingPage::mount(window.clone(), quick_config()).unwrap();

    let link: HtmlElement = by_id(&document, "jump");
    link.set_attribute("href", "#far").unwrap();
    link.click();

    TimeoutFuture::new(1500).await;
    assert!(window.scroll_y().unwrap() > 1000.0);
    window.scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
async fn autofill_highlight_fades_out() {
    let (window, document) = fixture(r#"<form id="finalForm"><input id="finalEmail" type="email"></form>"#);
    let mut config = quick_config();
    config.autofill_highlight_ms = 100;
    let _page = LandingPage::mount(window, config).unwrap();
    let input: HtmlInputElement = by_id(&document, "finalEmail");

    input.set_value("ana@finnvest.io");
    input.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert!(input.class_list().contains("autofilled"));

    TimeoutFuture::new(250).await;
    assert!(!input.class_list().contains("autofilled"));
}
