//! Portfolio checkpoints
//!
//! Four static distance windows; entering one presents a text panel that
//! auto-hides after [`crate::consts::PANEL_SECS`]. The contact panel chains
//! a continuation prompt one second after it hides.

use serde::{Deserialize, Serialize};

/// Which portfolio section a checkpoint presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelKind {
    About,
    Skills,
    Projects,
    Contact,
}

/// A fixed distance window with its panel content
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    /// Open interval of travel distance; both endpoints are exclusive
    pub window: (f32, f32),
    pub kind: PanelKind,
    pub title: &'static str,
    pub body: &'static str,
}

impl Checkpoint {
    /// True when `distance` lies strictly inside the window
    pub fn contains(&self, distance: f32) -> bool {
        distance > self.window.0 && distance < self.window.1
    }
}

/// The static checkpoint table, in travel order
pub const CHECKPOINTS: [Checkpoint; 4] = [
    Checkpoint {
        window: (100.0, 110.0),
        kind: PanelKind::About,
        title: "Name / About Me",
        body: "I enjoy exploring web development, systems programming and \
               networking. I like building interactive projects, \
               experimenting with new technologies, and improving my \
               skills every day.",
    },
    Checkpoint {
        window: (300.0, 310.0),
        kind: PanelKind::Skills,
        title: "Skills",
        body: "Rust, JavaScript, HTML, CSS, WebAssembly, Node.js, \
               3D graphics, Git, responsive web design.",
    },
    Checkpoint {
        window: (600.0, 610.0),
        kind: PanelKind::Projects,
        title: "Projects",
        body: "An interactive endless 3D obstacle game. A battleship game. \
               Tic Tac Toe.",
    },
    Checkpoint {
        window: (900.0, 910.0),
        kind: PanelKind::Contact,
        title: "Contact",
        body: "Email: hello@example.com / GitHub: portfolio-runner",
    },
];

/// Index of the checkpoint whose window strictly contains `distance`, if any
pub fn checkpoint_at(distance: f32) -> Option<usize> {
    CHECKPOINTS.iter().position(|c| c.contains(distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_window_interior() {
        assert_eq!(checkpoint_at(105.0), Some(0));
        assert_eq!(CHECKPOINTS[0].kind, PanelKind::About);
    }

    #[test]
    fn test_window_endpoints_are_exclusive() {
        // Boundary values must NOT trigger
        assert_eq!(checkpoint_at(300.0), None);
        assert_eq!(checkpoint_at(310.0), None);
        assert_eq!(checkpoint_at(305.0), Some(1));
    }

    #[test]
    fn test_gaps_between_windows() {
        assert_eq!(checkpoint_at(0.0), None);
        assert_eq!(checkpoint_at(150.0), None);
        assert_eq!(checkpoint_at(605.0), Some(2));
        assert_eq!(checkpoint_at(905.0), Some(3));
        assert_eq!(checkpoint_at(1000.0), None);
    }

    #[test]
    fn test_contact_is_last() {
        assert_eq!(CHECKPOINTS[3].kind, PanelKind::Contact);
    }
}
