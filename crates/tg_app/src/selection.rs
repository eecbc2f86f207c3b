/// Platform-neutral integer rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Construct a normalized rectangle from two points.
    #[inline]
    pub fn from_points(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            left: x1.min(x2),
            top: y1.min(y2),
            right: x1.max(x2),
            bottom: y1.max(y2),
        }
    }

    /// True if the rectangle encloses no pixels.
    ///
    /// A degenerate rectangle is still a valid selection; the capture path is
    /// expected to tolerate it and produce an empty image.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Overlay session phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No overlay session active.
    #[default]
    Idle,
    /// Overlay is visible and waiting for the first pointer-down.
    Armed,
    /// Pointer is held down; the rectangle tracks every pointer-move.
    Dragging {
        anchor: (i32, i32),
        current: (i32, i32),
    },
}

/// Input actions (pure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Begin an overlay session. Ignored while one is already active.
    Activate,
    /// Pointer pressed at the given overlay position.
    PointerDown { x: i32, y: i32 },
    /// Pointer moved while the overlay is active.
    PointerMove { x: i32, y: i32 },
    /// Pointer released. Completes the session with a normalized rectangle.
    PointerUp { x: i32, y: i32 },
    /// Abort the session without producing a capture (Escape / right-click).
    Cancel,
}

/// Effects requested by the selection core (executed by the host).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show the full-screen overlay with a crosshair cursor.
    ShowOverlay,
    /// Dismiss the overlay and restore the cursor.
    DismissOverlay,
    /// Capture exactly this rectangle of the display and deliver the image.
    ///
    /// The rectangle may be degenerate; no minimum-size rule applies here.
    CaptureRegion { rect: RectI32 },
    /// The session ended without a capture.
    SessionCancelled,
}

/// Selection state machine model.
///
/// Owns nothing beyond the current phase; the rectangle only exists between
/// pointer-down and pointer-up of a single session.
#[derive(Debug, Default)]
pub struct Model {
    phase: Phase,
}

impl Model {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Rectangle to paint while dragging, if any.
    pub fn visible_selection(&self) -> Option<RectI32> {
        match self.phase {
            Phase::Dragging {
                anchor: (ax, ay),
                current: (cx, cy),
            } => Some(RectI32::from_points(ax, ay, cx, cy)),
            _ => None,
        }
    }

    pub fn reduce(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Activate => {
                // Only one overlay session can exist at a time.
                if !matches!(self.phase, Phase::Idle) {
                    return Vec::new();
                }
                self.phase = Phase::Armed;
                vec![Effect::ShowOverlay]
            }

            Action::PointerDown { x, y } => {
                if matches!(self.phase, Phase::Armed) {
                    self.phase = Phase::Dragging {
                        anchor: (x, y),
                        current: (x, y),
                    };
                }
                Vec::new()
            }

            Action::PointerMove { x, y } => {
                if let Phase::Dragging { current, .. } = &mut self.phase {
                    *current = (x, y);
                }
                Vec::new()
            }

            Action::PointerUp { x, y } => {
                let Phase::Dragging {
                    anchor: (ax, ay), ..
                } = self.phase
                else {
                    // A release without a press (e.g. the click that opened the
                    // overlay) is ignored rather than treated as a selection.
                    return Vec::new();
                };

                self.phase = Phase::Idle;
                let rect = RectI32::from_points(ax, ay, x, y);
                vec![Effect::DismissOverlay, Effect::CaptureRegion { rect }]
            }

            Action::Cancel => {
                if matches!(self.phase, Phase::Idle) {
                    return Vec::new();
                }
                self.phase = Phase::Idle;
                vec![Effect::DismissOverlay, Effect::SessionCancelled]
            }
        }
    }
}
