use crate::constants::MAX_LATTICE_DOTS;
use glam::Vec2;

/// Where a dot is in its impulse cycle. A dot can only be launched from
/// `AtRest` unless the retrigger policy says otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImpulseState {
    #[default]
    AtRest,
    Pushing,
    Settling,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub offset: Vec2,
    pub state: ImpulseState,
}

impl Dot {
    pub fn at(center: Vec2) -> Self {
        Self {
            center,
            offset: Vec2::ZERO,
            state: ImpulseState::AtRest,
        }
    }

    #[inline]
    pub fn impulse_active(&self) -> bool {
        self.state != ImpulseState::AtRest
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.center + self.offset
    }
}

/// Rectangular lattice of dot centers fitted to a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lattice {
    pub cols: usize,
    pub rows: usize,
    /// Dot diameter plus gap.
    pub cell: f32,
    /// Center of the top-left dot.
    pub start: Vec2,
    /// Extent from the first dot's left/top edge to the last dot's right/bottom edge.
    pub footprint: Vec2,
}

impl Lattice {
    /// Fit as many whole dots as the surface holds and center them.
    /// Degenerate input (empty surface, non-positive cell, a lattice larger
    /// than `MAX_LATTICE_DOTS`) yields no dots.
    pub fn fit(size: Vec2, dot_size: f32, gap: f32) -> Self {
        let cell = dot_size + gap;
        if !(cell > 0.0) || !size.is_finite() {
            return Self::default();
        }
        let count = |extent: f32| {
            ((extent.max(0.0) + gap) / cell)
                .floor()
                .clamp(0.0, MAX_LATTICE_DOTS as f32) as usize
        };
        let span = |n: usize| if n == 0 { 0.0 } else { cell * n as f32 - gap };
        let cols = count(size.x);
        let rows = count(size.y);
        if !cols
            .checked_mul(rows)
            .is_some_and(|n| n <= MAX_LATTICE_DOTS)
        {
            log::warn!(
                "[grid] {}x{} lattice exceeds {} dots, nothing drawn",
                cols,
                rows,
                MAX_LATTICE_DOTS
            );
            return Self::default();
        }
        let footprint = Vec2::new(span(cols), span(rows));
        let extra = size.max(Vec2::ZERO) - footprint;
        Self {
            cols,
            rows,
            cell,
            start: extra / 2.0 + Vec2::splat(dot_size / 2.0),
            footprint,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cols.saturating_mul(self.rows)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major dot centers.
    pub fn centers(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols)
                .map(move |col| self.start + Vec2::new(col as f32, row as f32) * self.cell)
        })
    }

    pub fn build_dots(&self) -> Vec<Dot> {
        let mut dots = Vec::with_capacity(self.len());
        dots.extend(self.centers().map(Dot::at));
        dots
    }
}
