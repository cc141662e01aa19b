//! Scanning state machine shared by the phrase and word-set extractors.
//!
//! The scanner walks `(word, tag)` pairs and reports what happened at each
//! token. It starts idle; a verb (not in final position) or a descriptive
//! adjective starts recording. While recording, a noun or foreign word is a
//! target, and the insight closes when the next tag cannot continue the noun
//! group. At the final token the insight either lands on a head or is
//! abandoned.

use super::tags::{head_kind, opens_insight};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// Recording started on this word.
    Start(&'a str),
    /// Word inside a recording that is not a head.
    Connective(&'a str),
    /// Noun or foreign-word head inside a recording.
    Target(&'a str),
    /// The current insight closed on its last target.
    Close,
    /// The response ended without landing on a head.
    Abandon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Recording,
}

/// Run the state machine over one response.
pub fn scan<'a>(tagged: &[(&'a str, &'a str)]) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Idle;
    let last = tagged.len().saturating_sub(1);

    for (i, &(word, tag)) in tagged.iter().enumerate() {
        let is_last = i == last;
        match state {
            State::Idle => {
                if opens_insight(tag, is_last) {
                    events.push(Event::Start(word));
                    state = State::Recording;
                }
            }
            State::Recording if is_last => {
                if head_kind(tag).is_some() {
                    events.push(Event::Target(word));
                    events.push(Event::Close);
                } else {
                    events.push(Event::Abandon);
                }
                state = State::Idle;
            }
            State::Recording => match head_kind(tag) {
                Some(kind) => {
                    events.push(Event::Target(word));
                    let (_, next_tag) = tagged[i + 1];
                    if !kind.continues(next_tag) {
                        events.push(Event::Close);
                        state = State::Idle;
                    }
                }
                None => events.push(Event::Connective(word)),
            },
        }
    }

    // A descriptive opener in final position never lands
    if state == State::Recording {
        events.push(Event::Abandon);
    }

    events
}
