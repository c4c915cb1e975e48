//! Presentation seam for the game session.

use crate::Board;

/// What the game client tells the presentation layer.
///
/// Implementations render however they like (terminal, GUI, test
/// recorder); the client only pushes state, it never reads back.
pub trait GameView: Send + Sync + 'static {
    /// The authenticated player's own name, shown once on open.
    fn show_user(&self, username: &str);

    /// The opponent's label, replaced on every board push.
    fn show_opponent(&self, opponent: &str);

    /// Full board replacement. No incremental diffs.
    fn show_board(&self, board: &Board);

    /// A status or turn message from the server.
    fn show_message(&self, message: &str);
}
