use crate::dom::NodeId;

/// Event types the runtime routes to controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Input,
    Submit,
    KeyDown,
    MouseMove,
    MouseLeave,
    Scroll,
    ImageError,
}

/// A dispatched event. `key` is set for `KeyDown`, `offset` (pointer position
/// relative to the target's center) for `MouseMove`.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    pub key: Option<String>,
    pub offset: Option<(f64, f64)>,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Event {
            kind,
            target,
            key: None,
            offset: None,
        }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn change(target: NodeId) -> Self {
        Self::new(EventKind::Change, target)
    }

    pub fn input(target: NodeId) -> Self {
        Self::new(EventKind::Input, target)
    }

    pub fn submit(target: NodeId) -> Self {
        Self::new(EventKind::Submit, target)
    }

    pub fn key_down(target: NodeId, key: &str) -> Self {
        Event {
            key: Some(key.to_string()),
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    pub fn mouse_move(target: NodeId, dx: f64, dy: f64) -> Self {
        Event {
            offset: Some((dx, dy)),
            ..Self::new(EventKind::MouseMove, target)
        }
    }

    pub fn mouse_leave(target: NodeId) -> Self {
        Self::new(EventKind::MouseLeave, target)
    }

    pub fn scroll(target: NodeId) -> Self {
        Self::new(EventKind::Scroll, target)
    }

    pub fn image_error(target: NodeId) -> Self {
        Self::new(EventKind::ImageError, target)
    }

    /// Enter and Space activate buttons-that-aren't-buttons.
    pub fn is_activation_key(&self) -> bool {
        matches!(self.key.as_deref(), Some("Enter") | Some(" "))
    }
}

/// What a registered listener does. Controllers register these on nodes;
/// the site runtime maps each one back to the owning controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Enter/Space on the node is re-dispatched as a click.
    ActivateOnKey,
    ToggleTheme,
    ToggleMenu,
    CloseMenu,
    SwitchLanguage,
    FilterProjects,
    OpenProject(usize),
    CloseOverlay,
    OverlayBackdrop,
    OverlayKey,
    RetryProjects,
    RetryBlog,
    ImageFallback,
    SelectPackage,
    RecalculateBudget,
    TrackOrderProgress,
    SubmitOrder,
    SubmitContact,
    OpenWhatsapp,
    DownloadCv,
    ScrollToTop,
    PageScroll,
    MagneticMove,
    MagneticLeave,
}

/// Result of dispatching one event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Number of listeners that ran.
    pub handled: usize,
    /// Whether any handler suppressed the default navigation/submission.
    pub default_prevented: bool,
}
