include!(concat!(env!("OUT_DIR"), "/decks.rs"));

/// The deck presented when no path is given.
pub(crate) const DEFAULT_DECK: &str = "seismic-waves";

/// Get the raw contents of a deck that ships with the binary.
pub(crate) fn deck_contents(name: &str) -> Option<&'static [u8]> {
    DECKS.get(name).copied()
}
