use architect_core::{EditSession, TransformConfig};
use web_sys::{Document, Window};

/// Runtime state shared by the DOM callbacks behind an `Rc<RefCell<_>>`.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub session: EditSession,
    pub config: TransformConfig,
}
