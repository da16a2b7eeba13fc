//! Extraction of the capture groups of the current match.

use log::trace;

use crate::{
    bridge::{decode_units, unit_buffer},
    engine::Fill,
    engine_error, Captures, Engine, Group, Result, Span,
};

/// Builds the [`Captures`] of the engine's current match.
///
/// Unmatched groups become [`Group::unmatched`] without querying their text. For every other
/// group exactly `end - start` code units are requested, an engine that produces a different
/// amount is inconsistent and the extraction fails.
pub(crate) fn extract_groups<E: Engine>(engine: &E) -> Result<Captures> {
    let count = engine.group_count()?;
    let mut groups = Vec::with_capacity(count + 1);
    for index in 0..=count {
        let Some((start, end)) = engine.bounds(index)? else {
            groups.push(Group::unmatched());
            continue;
        };
        if end < start {
            return Err(engine_error!(
                "group {} ends at {} before it starts at {}",
                index,
                end,
                start
            ));
        }
        let expected = end - start;
        let mut buffer = unit_buffer(expected)?;
        match engine.group(index, &mut buffer)? {
            Fill::Complete(produced) if produced == expected => {}
            Fill::Complete(produced) | Fill::Overflow { required: produced } => {
                return Err(engine_error!(
                    "group {} produced {} code units, bounds {}..{} span {}",
                    index,
                    produced,
                    start,
                    end,
                    expected
                ));
            }
        }
        groups.push(Group::matched(Span::new(start, end), decode_units(&buffer)?));
    }
    trace!("Extracted {} groups", groups.len());
    Ok(Captures::new(groups))
}
