use crate::{Effect, PagerMsg, PagerState, StopReason};

/// Pure pagination step: folds a decoded page into the state and decides
/// whether to fetch the next cursor or stop.
pub fn update<T>(mut state: PagerState<T>, msg: PagerMsg<T>) -> (PagerState<T>, Effect) {
    if let Some(reason) = state.stopped() {
        return (state, Effect::Finish(reason));
    }

    let (page, follow_up) = match msg {
        PagerMsg::Seed(page) => (page, false),
        PagerMsg::Continuation(page) => (page, true),
        PagerMsg::ContainerMissing => {
            let effect = state.finish(StopReason::MissingContainer);
            return (state, effect);
        }
    };

    state.record_page(page.items, follow_up);

    let effect = if state.limit_reached() {
        state.finish(StopReason::LimitReached)
    } else {
        match page.cursor {
            None => state.finish(StopReason::CursorExhausted),
            Some(cursor) if !state.remember_cursor(&cursor) => {
                state.finish(StopReason::RepeatedCursor)
            }
            Some(_) if state.unproductive_exceeded() => state.finish(StopReason::Unproductive),
            Some(cursor) => Effect::FetchContinuation { cursor },
        }
    };

    (state, effect)
}
