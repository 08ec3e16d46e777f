#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue `{context, continuation: cursor}` against the same endpoint.
    FetchContinuation { cursor: String },
    Finish(StopReason),
}

/// Why a pagination sequence ended. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    CursorExhausted,
    LimitReached,
    RepeatedCursor,
    MissingContainer,
    Unproductive,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            StopReason::CursorExhausted => "cursor exhausted",
            StopReason::LimitReached => "limit reached",
            StopReason::RepeatedCursor => "repeated cursor",
            StopReason::MissingContainer => "no continuation container",
            StopReason::Unproductive => "unproductive pages",
        };
        f.write_str(text)
    }
}
