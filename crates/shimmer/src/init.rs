//! Process setup and host construction.

use std::cell::RefCell;
use std::rc::Rc;

use shimmer_ui::{EngineEvents, Graphics, ImUiContext, InputState, Toolkit};

use crate::{Options, Result};

/// Installs the `env_logger` backend for the `log` facade.
///
/// Safe to call more than once; only the first call installs a logger.
pub fn init() {
    if env_logger::try_init().is_ok() {
        log::info!("shimmer initialized");
    }
}

/// Creates a UI host and attaches it to `events`.
///
/// The engine keeps the returned handle alive for as long as the UI should
/// run; dropping it shuts the toolkit down and silences the handlers.
///
/// # Example
///
/// ```no_run
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use shimmer::*;
///
/// fn setup(
///     toolkit: Box<dyn Toolkit>,
///     graphics: Rc<RefCell<dyn Graphics>>,
///     input: Rc<dyn InputState>,
/// ) -> Result<()> {
///     let mut events = EngineEvents::new();
///     let host = attach_host(toolkit, graphics, input, Options::default(), &mut events)?;
///     events.begin_frame.emit(BeginFrame { time_step: 1.0 / 60.0 });
///     events.end_rendering.emit(());
///     assert_eq!(host.borrow().frame_count(), 1);
///     Ok(())
/// }
/// ```
pub fn attach_host(
    toolkit: Box<dyn Toolkit>,
    graphics: Rc<RefCell<dyn Graphics>>,
    input: Rc<dyn InputState>,
    options: Options,
    events: &mut EngineEvents,
) -> Result<Rc<RefCell<ImUiContext>>> {
    let host = Rc::new(RefCell::new(ImUiContext::new(
        toolkit, graphics, input, options,
    )));
    ImUiContext::attach(&host, events)?;
    Ok(host)
}
