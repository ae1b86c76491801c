//! Regression check that replays a recorded game through move inference.
//!
//! For every ply the grids before and after the move are derived from the
//! rules position, inferred back into a move and compared with what was
//! actually played.

use crate::{grid_from_position, infer_move, InferError};
use log::debug;
use serde::{Deserialize, Serialize};
use shakmaty::{san::SanPlus, CastlingMode, Chess, Position};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    /// Plies whose inferred move matched.
    pub checked: usize,
    /// Promotions are not inferable from occupancy and are played unchecked.
    pub skipped_promotions: usize,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("ply {ply}: cannot parse move `{token}`")]
    Parse { ply: usize, token: String },
    #[error("ply {ply}: `{san}` is not legal")]
    Illegal { ply: usize, san: String },
    #[error("ply {ply}: inference failed for {expected}: {source}")]
    Inference {
        ply: usize,
        expected: String,
        source: InferError,
    },
    #[error("ply {ply}: expected {expected}, inferred {inferred}")]
    Mismatch {
        ply: usize,
        expected: String,
        inferred: String,
    },
}

/// Replay the main line of a PGN game from the standard start position.
pub fn replay_pgn(text: &str) -> Result<ReplayReport, ReplayError> {
    replay_pgn_from(Chess::default(), text)
}

#[cfg_attr(feature = "tracing", instrument(level = "info", skip(position, text)))]
pub fn replay_pgn_from(mut position: Chess, text: &str) -> Result<ReplayReport, ReplayError> {
    let mut report = ReplayReport::default();

    for (idx, token) in san_tokens(text).into_iter().enumerate() {
        let ply = idx + 1;
        let san: SanPlus = token.parse().map_err(|_| ReplayError::Parse {
            ply,
            token: token.to_string(),
        })?;
        let m = san.san.to_move(&position).map_err(|_| ReplayError::Illegal {
            ply,
            san: token.to_string(),
        })?;

        let before = grid_from_position(&position);
        position.play_unchecked(m);

        if m.is_promotion() {
            debug!("ply {ply}: skipping promotion {token}");
            report.skipped_promotions += 1;
            continue;
        }

        let after = grid_from_position(&position);
        let expected = m.to_uci(CastlingMode::Standard).to_string();
        let inferred = infer_move(&before, &after)
            .map_err(|source| ReplayError::Inference {
                ply,
                expected: expected.clone(),
                source,
            })?
            .to_uci()
            .to_string();

        if inferred != expected {
            return Err(ReplayError::Mismatch {
                ply,
                expected,
                inferred,
            });
        }
        debug!("ply {ply}: {token} = {inferred}");
        report.checked += 1;
    }

    Ok(report)
}

/// Main-line SAN tokens: tag pairs, comments, variations, move numbers,
/// NAGs, annotation glyphs and result markers are dropped.
fn san_tokens(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut skip_until: Option<char> = None;
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        let outside_variation = depth == 0;
        if let Some(end) = skip_until {
            if c == end {
                skip_until = None;
            }
            continue;
        }
        let boundary = match c {
            '[' => Some(Some(']')),
            '{' => Some(Some('}')),
            ';' => Some(Some('\n')),
            '(' => {
                depth += 1;
                Some(None)
            }
            ')' => {
                depth = depth.saturating_sub(1);
                Some(None)
            }
            c if c.is_whitespace() => Some(None),
            _ => None,
        };
        match boundary {
            Some(skip) => {
                if let Some(s) = start.take() {
                    if outside_variation {
                        spans.push(&text[s..i]);
                    }
                }
                skip_until = skip;
            }
            None => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        if depth == 0 {
            spans.push(&text[s..]);
        }
    }

    spans
        .into_iter()
        .filter_map(|raw| {
            // "12." / "12..." / "12.e4"
            let token = raw.rsplit('.').next().unwrap_or(raw);
            let token = token.trim_end_matches(['!', '?']);
            let drop = token.is_empty()
                || token.starts_with('$')
                || matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*");
            (!drop).then_some(token)
        })
        .collect()
}
