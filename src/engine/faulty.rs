//! An engine for tests that wraps [`RegexEngine`] and misreports on request.

use super::{Engine, Fill, RegexEngine};
use crate::{RegexFlags, Result};

#[derive(Debug)]
pub(crate) struct FaultyEngine {
    inner: RegexEngine,
    /// Added to every reported bound.
    pub(crate) bounds_shift: usize,
    /// Reports every bound pair as `(end, start)`.
    pub(crate) swap_bounds: bool,
    /// Reports one code unit less than written for non-empty groups.
    pub(crate) short_group: bool,
    /// Replace calls report an overflow without a usable size.
    pub(crate) stuck_replace: bool,
    pub(crate) replace_calls: usize,
}

impl Engine for FaultyEngine {
    fn open(pattern: &str, flags: RegexFlags) -> Result<Self> {
        Ok(FaultyEngine {
            inner: RegexEngine::open(pattern, flags)?,
            bounds_shift: 0,
            swap_bounds: false,
            short_group: false,
            stuck_replace: false,
            replace_calls: 0,
        })
    }

    fn try_clone(&self) -> Result<Self> {
        Ok(FaultyEngine {
            inner: self.inner.try_clone()?,
            bounds_shift: self.bounds_shift,
            swap_bounds: self.swap_bounds,
            short_group: self.short_group,
            stuck_replace: self.stuck_replace,
            replace_calls: 0,
        })
    }

    fn pattern(&self) -> &str {
        self.inner.pattern()
    }

    fn flags(&self) -> RegexFlags {
        self.inner.flags()
    }

    fn set_text(&mut self, text: &[u16]) -> Result<()> {
        self.inner.set_text(text)
    }

    fn text(&self) -> Result<Vec<u16>> {
        self.inner.text()
    }

    fn matches(&mut self, start: usize) -> Result<bool> {
        self.inner.matches(start)
    }

    fn find(&mut self, start: usize) -> Result<bool> {
        self.inner.find(start)
    }

    fn find_next(&mut self) -> Result<bool> {
        self.inner.find_next()
    }

    fn group_count(&self) -> Result<usize> {
        self.inner.group_count()
    }

    fn bounds(&self, group: usize) -> Result<Option<(usize, usize)>> {
        Ok(self.inner.bounds(group)?.map(|(start, end)| {
            let (start, end) = (start + self.bounds_shift, end + self.bounds_shift);
            if self.swap_bounds {
                (end, start)
            } else {
                (start, end)
            }
        }))
    }

    fn group(&self, group: usize, dest: &mut [u16]) -> Result<Fill> {
        match self.inner.group(group, dest)? {
            Fill::Complete(len) if self.short_group && len > 0 => Ok(Fill::Complete(len - 1)),
            fill => Ok(fill),
        }
    }

    fn reset(&mut self, index: usize) -> Result<()> {
        self.inner.reset(index)
    }

    fn replace_first(&mut self, replacement: &[u16], dest: &mut [u16]) -> Result<Fill> {
        self.replace_calls += 1;
        if self.stuck_replace {
            return Ok(Fill::Overflow {
                required: dest.len() + 1,
            });
        }
        self.inner.replace_first(replacement, dest)
    }

    fn replace_all(&mut self, replacement: &[u16], dest: &mut [u16]) -> Result<Fill> {
        self.replace_calls += 1;
        if self.stuck_replace {
            return Ok(Fill::Overflow {
                required: dest.len().saturating_sub(1),
            });
        }
        self.inner.replace_all(replacement, dest)
    }
}
