use std::collections::{HashMap, HashSet};

use crate::tuple::RelationTuple;

pub const DEFAULT_COLORS: [&str; 14] = [
    "blue3",
    "aqua",
    "aquamarine4",
    "blueviolet",
    "chocolate4",
    "darkgoldenrod",
    "darkgreen",
    "darkorange",
    "deeppink",
    "green",
    "indigo",
    "midnightblue",
    "sienna4",
    "tomato1",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("palette exhausted: all {palette_size} colors are in use")]
    PaletteExhausted { palette_size: usize },
}

/// Ordered supply of color names.
///
/// Colors are taken from the end of the list and released colors are pushed
/// back onto the end, so a freed color is the next one handed out. Repeated
/// names are dropped, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    available: Vec<String>,
    size: usize,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let available: Vec<String> = colors
            .into_iter()
            .map(Into::into)
            .filter(|color: &String| seen.insert(color.clone()))
            .collect();
        let size = available.len();
        Self { available, size }
    }

    /// Number of colors the palette was created with.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    fn take(&mut self) -> Result<String, ColorError> {
        self.available.pop().ok_or(ColorError::PaletteExhausted {
            palette_size: self.size,
        })
    }

    fn release(&mut self, color: String) {
        self.available.push(color);
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorSummary {
    /// Connected components left after all merges.
    pub groups: usize,
    pub merges: usize,
}

#[derive(Debug, Default)]
struct ColorGroup {
    color: String,
    members: Vec<usize>,
}

/// Call-scoped state for one coloring run.
///
/// Groups live in an arena and are addressed by index; `by_key` maps every
/// left key and referenced right key to the group currently owning it.
#[derive(Debug)]
pub struct ColorAssigner {
    palette: Palette,
    groups: Vec<ColorGroup>,
    by_key: HashMap<String, usize>,
    merges: usize,
}

impl ColorAssigner {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            groups: Vec::new(),
            by_key: HashMap::new(),
            merges: 0,
        }
    }

    /// Colors every tuple so that linked tuples share a color and unlinked
    /// components never do. Tuples are left untouched on error.
    pub fn assign(mut self, tuples: &mut [RelationTuple]) -> Result<ColorSummary, ColorError> {
        self.partition(tuples)?;

        let mut groups = 0;
        for group in self.groups.iter().filter(|g| !g.members.is_empty()) {
            groups += 1;
            for &member in &group.members {
                tuples[member].color.clone_from(&group.color);
            }
        }

        Ok(ColorSummary {
            groups,
            merges: self.merges,
        })
    }

    fn partition(&mut self, tuples: &[RelationTuple]) -> Result<(), ColorError> {
        for (index, tuple) in tuples.iter().enumerate() {
            let group = match self.by_key.get(&tuple.left_key()).copied() {
                Some(group) => group,
                None => {
                    let group = self.open_group()?;
                    self.by_key.insert(tuple.left_key(), group);
                    group
                }
            };
            self.groups[group].members.push(index);

            let Some(right) = tuple.right_key() else {
                continue;
            };
            match self.by_key.get(&right).copied() {
                Some(other) if other != group => self.absorb(group, other, tuples),
                Some(_) => {}
                None => {
                    self.by_key.insert(right, group);
                }
            }
        }
        Ok(())
    }

    fn open_group(&mut self) -> Result<usize, ColorError> {
        let color = self.palette.take()?;
        self.groups.push(ColorGroup {
            color,
            members: Vec::new(),
        });
        Ok(self.groups.len() - 1)
    }

    /// Moves every member of `absorbed` into `survivor` and frees its color.
    fn absorb(&mut self, survivor: usize, absorbed: usize, tuples: &[RelationTuple]) {
        let members = std::mem::take(&mut self.groups[absorbed].members);
        for &member in &members {
            let tuple = &tuples[member];
            self.by_key.insert(tuple.left_key(), survivor);
            if let Some(right) = tuple.right_key() {
                self.by_key.insert(right, survivor);
            }
        }
        self.groups[survivor].members.extend(members);

        let color = std::mem::take(&mut self.groups[absorbed].color);
        self.palette.release(color);
        self.merges += 1;
    }
}

/// Runs one coloring pass with a fresh palette.
pub fn assign_colors(
    tuples: &mut [RelationTuple],
    palette: Palette,
) -> Result<ColorSummary, ColorError> {
    ColorAssigner::new(palette).assign(tuples)
}
