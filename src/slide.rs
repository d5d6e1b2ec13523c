use crate::counter::Counter;
use crate::deck::SlideMarkup;
use crate::progress::ProgressIndicator;

pub struct Slide {
    pub title: Option<String>,
    pub caption: Option<String>,

    pub counters: Vec<Counter>,
    pub progress: Option<ProgressIndicator>,

    pub is_active: bool,
}

impl Slide {
    pub fn from_markup(markup: &SlideMarkup) -> Self {
        Self {
            title: markup.title.clone(),
            caption: markup.caption.clone(),
            counters: markup.counters.iter().map(Counter::from_markup).collect(),
            progress: markup.progress.as_ref().map(ProgressIndicator::from_markup),
            is_active: false,
        }
    }

    pub fn animate_counters(&mut self, reduced_motion: bool) {
        for counter in self.counters.iter_mut() {
            counter.animate(reduced_motion);
        }
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.counters.iter().any(Counter::is_animating)
    }
}
