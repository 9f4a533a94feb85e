//! Action sinks executing dispatcher output.
//!
//! The X11 sink injects XF86 media keys through the XTEST extension, so the
//! desktop's own media key bindings decide what "volume up" or "play/pause"
//! means. Other sinks log or record actions without touching the system.

use crate::{
    constants::{KEYSYM_PLAY_PAUSE, KEYSYM_VOLUME_DOWN, KEYSYM_VOLUME_UP},
    dispatcher::Action,
    error::{Error, Result},
};
use log::{debug, info};
use x11rb::{
    connection::{Connection, RequestConnection},
    protocol::{
        xproto::{ConnectionExt as _, Keycode, Keysym, Window, KEY_PRESS_EVENT, KEY_RELEASE_EVENT},
        xtest::{self, ConnectionExt as _},
    },
    rust_connection::RustConnection,
};

/// Trait for everything that can carry out an [`Action`]
pub trait ActionSink {
    /// Execute a single action. [`Action::None`] is a no-op.
    fn execute(&mut self, action: Action) -> Result<()>;

    /// Get sink name
    fn name(&self) -> &str;
}

impl<T: ActionSink + ?Sized> ActionSink for Box<T> {
    fn execute(&mut self, action: Action) -> Result<()> {
        (**self).execute(action)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Keycodes resolved for the three media keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MediaKeycodes {
    volume_up: Keycode,
    volume_down: Keycode,
    play_pause: Keycode,
}

impl MediaKeycodes {
    const fn for_action(&self, action: Action) -> Option<Keycode> {
        match action {
            Action::VolumeUp => Some(self.volume_up),
            Action::VolumeDown => Some(self.volume_down),
            Action::PlayPauseToggle => Some(self.play_pause),
            Action::None => None,
        }
    }
}

/// Media key injection for X11
pub struct X11KeySink {
    connection: RustConnection,
    root: Window,
    keycodes: MediaKeycodes,
}

impl X11KeySink {
    /// Connect to the X server and resolve media keycodes
    ///
    /// # Errors
    ///
    /// Returns `Error::X11` if the display cannot be opened, XTEST is missing,
    /// or the keyboard mapping lacks one of the XF86 media keysyms.
    pub fn new() -> Result<Self> {
        info!("Initializing X11 media key sink");

        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::X11(format!("Failed to connect to X11: {e}")))?;

        let root = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| Error::X11("Failed to get screen".to_string()))?
            .root;

        let has_xtest = connection
            .extension_information(xtest::X11_EXTENSION_NAME)
            .map_err(|e| Error::X11(format!("Failed to query XTEST: {e}")))?
            .is_some();
        if !has_xtest {
            return Err(Error::X11("XTEST extension not available".to_string()));
        }

        let min_keycode = connection.setup().min_keycode;
        let max_keycode = connection.setup().max_keycode;
        let count = max_keycode.saturating_sub(min_keycode).saturating_add(1);
        let mapping = connection
            .get_keyboard_mapping(min_keycode, count)
            .map_err(|e| Error::X11(format!("Failed to send keyboard mapping request: {e}")))?
            .reply()
            .map_err(|e| Error::X11(format!("Failed to get keyboard mapping: {e}")))?;

        let lookup = |keysym: Keysym, name: &str| {
            find_keycode(min_keycode, mapping.keysyms_per_keycode, &mapping.keysyms, keysym)
                .ok_or_else(|| Error::X11(format!("No keycode bound to {name}")))
        };
        let keycodes = MediaKeycodes {
            volume_up: lookup(KEYSYM_VOLUME_UP, "XF86AudioRaiseVolume")?,
            volume_down: lookup(KEYSYM_VOLUME_DOWN, "XF86AudioLowerVolume")?,
            play_pause: lookup(KEYSYM_PLAY_PAUSE, "XF86AudioPlay")?,
        };

        info!("Resolved media keycodes: {:?}", keycodes);

        Ok(Self {
            connection,
            root,
            keycodes,
        })
    }

    fn tap(&self, keycode: Keycode) -> Result<()> {
        for event in [KEY_PRESS_EVENT, KEY_RELEASE_EVENT] {
            self.connection
                .xtest_fake_input(event, keycode, x11rb::CURRENT_TIME, self.root, 0, 0, 0)
                .map_err(|e| Error::X11(format!("Failed to send fake input: {e}")))?;
        }

        self.connection
            .flush()
            .map_err(|e| Error::X11(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }
}

impl ActionSink for X11KeySink {
    fn execute(&mut self, action: Action) -> Result<()> {
        let Some(keycode) = self.keycodes.for_action(action) else {
            return Ok(());
        };
        debug!("Injecting keycode {} for {}", keycode, action);
        self.tap(keycode)
    }

    fn name(&self) -> &str {
        "x11"
    }
}

/// Dry-run sink that only logs
#[derive(Debug, Default)]
pub struct LogSink;

impl ActionSink for LogSink {
    fn execute(&mut self, action: Action) -> Result<()> {
        if action.is_some() {
            info!("Action: {}", action);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Sink that keeps every executed action in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    actions: Vec<Action>,
}

impl RecordingSink {
    /// Create an empty recording
    #[must_use]
    pub const fn new() -> Self {
        Self { actions: Vec::new() }
    }

    /// Actions executed so far, in order
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl ActionSink for RecordingSink {
    fn execute(&mut self, action: Action) -> Result<()> {
        if action.is_some() {
            self.actions.push(action);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "record"
    }
}

/// Create an action sink by type name
///
/// # Errors
///
/// Returns `Error::ActionSink` for unknown names, or the X11 error if the
/// X11 sink cannot be initialised.
pub fn create_sink(sink_type: &str) -> Result<Box<dyn ActionSink>> {
    match sink_type.to_lowercase().as_str() {
        "x11" | "xtest" => Ok(Box::new(X11KeySink::new()?)),
        "log" | "dry-run" | "none" => Ok(Box::new(LogSink)),
        "record" => Ok(Box::new(RecordingSink::new())),
        _ => Err(Error::ActionSink(format!("Unknown sink type: {sink_type}"))),
    }
}

/// Find the first keycode whose mapping row contains `keysym`
fn find_keycode(min_keycode: Keycode, keysyms_per_keycode: u8, keysyms: &[Keysym], keysym: Keysym) -> Option<Keycode> {
    if keysyms_per_keycode == 0 {
        return None;
    }

    keysyms
        .chunks(usize::from(keysyms_per_keycode))
        .position(|row| row.contains(&keysym))
        .and_then(|offset| u8::try_from(offset).ok())
        .and_then(|offset| min_keycode.checked_add(offset))
}
