use grafo::{GraphChanged, ImageSize, Notice, NoticeLevel, Scene, SceneConfig, Shell};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

/// Host services backed by JS callbacks. Callbacks run while the editor is busy and must not
/// call back into it; "graph changed" listeners (see `on_change`) may.
#[derive(Default)]
pub(crate) struct JsShell {
    pub(crate) weight_prompt: Option<Function>,
    pub(crate) label_prompt: Option<Function>,
    pub(crate) notifier: Option<Function>,
    pub(crate) image_loader: Option<Function>,
}

impl JsShell {
    /// A missing prompt accepts the initial text; `null`/`undefined` or a throw cancels.
    fn prompt(f: Option<&Function>, initial: &str) -> Option<String> {
        let Some(f) = f else {
            return Some(initial.to_string());
        };
        match f.call1(&JsValue::NULL, &JsValue::from_str(initial)) {
            Ok(v) => v.as_string(),
            Err(e) => {
                log::warn!("prompt callback threw: {:?}", e);
                None
            }
        }
    }
}

impl Shell for JsShell {
    fn prompt_weight(&mut self, initial: &str) -> Option<String> {
        Self::prompt(self.weight_prompt.as_ref(), initial)
    }

    fn prompt_label(&mut self, initial: &str) -> Option<String> {
        Self::prompt(self.label_prompt.as_ref(), initial)
    }

    fn notify(&mut self, notice: Notice) {
        match &self.notifier {
            Some(f) => {
                if let Err(e) = f.call1(&JsValue::NULL, &interop::to_js(&notice)) {
                    log::warn!("notifier callback threw: {:?}", e);
                }
            }
            None => match notice.level {
                NoticeLevel::Info => log::info!("{}: {}", notice.title, notice.message),
                NoticeLevel::Warning => log::warn!("{}: {}", notice.title, notice.message),
            },
        }
    }

    fn load_image(&mut self, path: &str) -> Result<ImageSize, String> {
        let Some(f) = &self.image_loader else {
            return Err(format!("cannot load '{}': no image loader installed", path));
        };
        let v = f
            .call1(&JsValue::NULL, &JsValue::from_str(path))
            .map_err(|e| e.as_string().unwrap_or_else(|| format!("cannot load '{}'", path)))?;
        serde_wasm_bindgen::from_value::<ImageSize>(v)
            .map_err(|e| format!("image loader returned no size for '{}': {}", path, e))
    }
}

type Listeners = Rc<RefCell<Vec<(u32, Function)>>>;

#[wasm_bindgen]
pub struct Editor {
    pub(crate) scene: RefCell<Scene>,
    pub(crate) shell: RefCell<JsShell>,
    pending: Rc<RefCell<Vec<GraphChanged>>>,
    listeners: Listeners,
    next_listener: RefCell<u32>,
}

impl Editor {
    pub fn rs_new(config: SceneConfig) -> Editor {
        let mut scene = Scene::new(config);
        let pending: Rc<RefCell<Vec<GraphChanged>>> = Rc::default();
        let queue = pending.clone();
        // Queue only: listeners run from `flush`, once the scene borrow is released.
        scene.subscribe(move |e| queue.borrow_mut().push(*e));
        Editor {
            scene: RefCell::new(scene),
            shell: RefCell::new(JsShell::default()),
            pending,
            listeners: Rc::default(),
            next_listener: RefCell::new(0),
        }
    }

    /// Run `f` with the scene and the JS shell, then deliver queued notifications.
    pub(crate) fn with_shell<R>(&self, f: impl FnOnce(&mut Scene, &mut JsShell) -> R) -> R {
        let out = {
            let mut scene = self.scene.borrow_mut();
            let mut shell = self.shell.borrow_mut();
            f(&mut scene, &mut shell)
        };
        self.flush();
        out
    }

    pub(crate) fn mutate<R>(&self, f: impl FnOnce(&mut Scene) -> R) -> R {
        let out = f(&mut self.scene.borrow_mut());
        self.flush();
        out
    }

    pub(crate) fn add_listener(&self, f: Function) -> u32 {
        let mut next = self.next_listener.borrow_mut();
        let id = *next;
        *next += 1;
        self.listeners.borrow_mut().push((id, f));
        id
    }

    pub(crate) fn remove_listener(&self, id: u32) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    fn flush(&self) {
        let events: Vec<GraphChanged> = std::mem::take(&mut *self.pending.borrow_mut());
        if events.is_empty() {
            return;
        }
        let listeners: Vec<Function> = self.listeners.borrow().iter().map(|(_, f)| f.clone()).collect();
        for e in events {
            let rev = JsValue::from_f64(e.revision as f64);
            for f in &listeners {
                if let Err(err) = f.call1(&JsValue::NULL, &rev) {
                    log::warn!("change listener threw: {:?}", err);
                }
            }
        }
    }
}
