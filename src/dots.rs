use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub index: usize,
    pub role: &'static str,
    pub aria_label: String,
    pub is_active: bool,
    pub aria_selected: bool,
    pub tabindex: i32,
}

impl Dot {
    fn new(index: usize) -> Self {
        Self {
            index,
            role: "tab",
            aria_label: format!("Go to indicator {}", index + 1),
            is_active: false,
            aria_selected: false,
            tabindex: -1,
        }
    }
}

/// Dot navigation container, one dot per slide.
#[derive(Debug, Clone)]
pub struct DotStrip {
    pub role: String,
    dots: Vec<Dot>,
}

impl DotStrip {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), dots: Vec::new() }
    }

    /// Returns the strip in `slot`, creating an empty `tablist` if there is none.
    pub fn ensure(slot: &mut Option<DotStrip>) -> &mut DotStrip {
        slot.get_or_insert_with(|| {
            debug!("creating dots container");
            DotStrip::new("tablist")
        })
    }

    /// Drops every existing dot and creates `count` fresh ones.
    pub fn rebuild(&mut self, count: usize) {
        self.dots.clear();
        self.dots.extend((0..count).map(Dot::new));
    }

    pub fn refresh(&mut self, active_index: usize) {
        for dot in self.dots.iter_mut() {
            let is_active = dot.index == active_index;
            dot.is_active = is_active;
            dot.aria_selected = is_active;
            dot.tabindex = if is_active { 0 } else { -1 };
        }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<usize> {
        self.dots.iter().find(|dot| dot.is_active).map(|dot| dot.index)
    }
}
