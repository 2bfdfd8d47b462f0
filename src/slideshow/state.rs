#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SlideState {
    Idle,              // Nothing shown yet
    TransitionPending, // Target is on the hidden layer, waiting for the next frame to flip
    Visible,           // Layers flipped; the crossfade runs or has settled
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LayerId {
    A,
    B,
}

impl LayerId {
    pub fn other(self) -> LayerId {
        match self {
            LayerId::A => LayerId::B,
            LayerId::B => LayerId::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            LayerId::A => 0,
            LayerId::B => 1,
        }
    }
}
