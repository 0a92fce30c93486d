use std::cell::RefCell;
use std::rc::Rc;

use architect_core::transform::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use architect_core::{
    EditSession, SAMPLE_PROMPTS, TransformConfig, floor_summaries, fmt_feet, grand_total,
    round_area, starter_layout,
};
use blueprint_core::{RenderOptions, build_blueprint_svg};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlTextAreaElement};

mod fetch;
mod state;
mod utils;

use state::State;
use utils::{escape_html, save_text_as_file, window_string};

const FALLBACK_WIDTH: f64 = 1000.0;

fn prompt_input(doc: &Document) -> Option<HtmlTextAreaElement> {
    doc.get_element_by_id("prompt")?.dyn_into().ok()
}

fn prompt_text(doc: &Document) -> String {
    prompt_input(doc).map(|t| t.value()).unwrap_or_default()
}

/// Redraw the plan at the current container width.
fn render_plan(state: &State) {
    let Some(container) = state.document.get_element_by_id("plan") else {
        return;
    };
    let width = match container.client_width() {
        w if w > 0 => w as f64,
        _ => FALLBACK_WIDTH,
    };
    match build_blueprint_svg(state.session.layout(), &RenderOptions::with_width(width)) {
        Ok((svg, w, h)) => {
            log::debug!("plan {w}x{h}");
            container.set_inner_html(&svg);
        }
        Err(e) => {
            log::error!("render failed: {e}");
            container.set_text_content(Some(&e.to_string()));
        }
    }
}

fn update_sidebar(state: &State) {
    let doc = &state.document;
    let layout = state.session.layout();
    if let Some(el) = doc.get_element_by_id("details") {
        let mut html = String::new();
        for floor in floor_summaries(layout) {
            html.push_str(&format!(
                "<h3 class=\"floor-name\">{}</h3><ul>",
                escape_html(&floor.name)
            ));
            for g in &floor.groups {
                html.push_str(&format!(
                    "<li><span class=\"swatch\" style=\"background-color:{}\"></span>\
                     <div><p class=\"room-name\">{}</p><p class=\"room-pos\">{}</p></div>\
                     <p class=\"room-area\">{} sq ft</p></li>",
                    escape_html(&g.color),
                    escape_html(&g.name),
                    escape_html(&g.position_text()),
                    round_area(g.total_area),
                ));
            }
            html.push_str("</ul>");
        }
        el.set_inner_html(&html);
    }
    if let Some(el) = doc.get_element_by_id("totalArea") {
        el.set_text_content(Some(&format!("{} sq ft", fmt_feet(grand_total(layout)))));
    }
    if let Some(el) = doc.get_element_by_id("landBadge") {
        el.set_text_content(Some(&format!(
            "Land: {}' x {}'",
            fmt_feet(layout.land.width),
            fmt_feet(layout.land.height)
        )));
    }
}

/// Sync the form with the session: busy flag, advisory and submit gating.
fn update_controls(state: &State) {
    let doc = &state.document;
    let pending = state.session.is_pending();
    if let Some(el) = doc.get_element_by_id("error")
        && let Ok(el) = el.dyn_into::<HtmlElement>()
    {
        match state.session.advisory() {
            Some(msg) => {
                el.set_text_content(Some(msg));
                el.set_hidden(false);
            }
            None => {
                el.set_text_content(None);
                el.set_hidden(true);
            }
        }
    }
    if let Some(input) = prompt_input(doc) {
        input.set_disabled(pending);
    }
    if let Some(btn) = doc.get_element_by_id("generate")
        && let Ok(btn) = btn.dyn_into::<HtmlButtonElement>()
    {
        btn.set_disabled(!state.session.can_submit(&prompt_text(doc)));
        btn.set_text_content(Some(if pending {
            "Designing..."
        } else {
            "Generate Changes"
        }));
    }
}

fn refresh(state: &State) {
    render_plan(state);
    update_sidebar(state);
    update_controls(state);
}

fn on_submit(state: Rc<RefCell<State>>) {
    let (submission, window, config) = {
        let mut s = state.borrow_mut();
        let text = prompt_text(&s.document);
        let submission = match s.session.submit(&text) {
            Ok(sub) => sub,
            Err(e) => {
                log::debug!("submit ignored: {e}");
                return;
            }
        };
        update_controls(&s);
        (submission, s.window.clone(), s.config.clone())
    };
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetch::transform_layout(
            &window,
            &config,
            &submission.layout,
            &submission.instruction,
        )
        .await;
        let mut s = state.borrow_mut();
        if s.session.complete(result)
            && let Some(input) = prompt_input(&s.document)
        {
            input.set_value("");
        }
        refresh(&s);
    });
}

fn attach_samples(state: &Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    let Some(list) = doc.get_element_by_id("samples") else {
        return Ok(());
    };
    for text in SAMPLE_PROMPTS {
        let btn = doc.create_element("button")?.dyn_into::<HtmlButtonElement>()?;
        btn.set_type("button");
        btn.set_class_name("sample");
        btn.set_text_content(Some(text));
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let s = st.borrow();
            if s.session.is_pending() {
                return;
            }
            if let Some(input) = prompt_input(&s.document) {
                input.set_value(text);
            }
            update_controls(&s);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
        list.append_child(&btn)?;
    }
    Ok(())
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let (doc, window) = {
        let s = state.borrow();
        (s.document.clone(), s.window.clone())
    };

    if let Some(btn) = doc.get_element_by_id("generate") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || on_submit(st.clone())));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(input) = prompt_input(&doc) {
        let st = state.clone();
        let oninput = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            update_controls(&st.borrow());
        }));
        input.set_oninput(Some(oninput.as_ref().unchecked_ref()));
        oninput.forget();
    }

    if let Some(btn) = doc.get_element_by_id("resetLayout") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut s = st.borrow_mut();
            s.session.reset();
            refresh(&s);
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(btn) = doc.get_element_by_id("exportSvg") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let s = st.borrow();
            let width = s
                .document
                .get_element_by_id("plan")
                .map(|el| el.client_width())
                .filter(|w| *w > 0)
                .map_or(FALLBACK_WIDTH, |w| w as f64);
            match build_blueprint_svg(s.session.layout(), &RenderOptions::with_width(width)) {
                Ok((svg, _, _)) => {
                    if let Err(e) = save_text_as_file(&s.document, "blueprint.svg", &svg) {
                        log::error!("download failed: {e:?}");
                    }
                }
                Err(e) => log::error!("export failed: {e}"),
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    if let Some(btn) = doc.get_element_by_id("saveJson") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let s = st.borrow();
            let json = s.session.layout().to_json_pretty();
            if let Err(e) = save_text_as_file(&s.document, "layout.json", &json) {
                log::error!("download failed: {e:?}");
            }
        }));
        btn.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();
    }

    attach_samples(&state)?;

    let st = state.clone();
    let onresize = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        render_plan(&st.borrow());
    }));
    window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
    onresize.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::log_1(&JsValue::from_str(&format!("logger: {e}")));
    }
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let api_key = window_string("__GEMINI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        log::warn!("window.__GEMINI_API_KEY is not set; edits will fail");
    }
    let config = TransformConfig::new(api_key)
        .with_model(window_string("__GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()))
        .with_endpoint(
            window_string("__GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
        );

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        session: EditSession::new(starter_layout()),
        config,
    }));
    attach_ui(state.clone())?;
    refresh(&state.borrow());
    Ok(())
}
