use rand::Rng;

use crate::deck::{AttrValue, CounterMarkup, Deck, ProgressMarkup, SlideMarkup};

// (title, counter label, prefix, suffix, value range, decimals)
const KPIS: [(&str, &str, &str, &str, (f64, f64), i64); 6] = [
    ("Revenue", "Monthly recurring revenue", "$", "k", (120.0, 980.0), 1),
    ("Customers", "Active accounts", "", "", (1_000.0, 25_000.0), 0),
    ("Satisfaction", "Net promoter score", "", "", (20.0, 80.0), 0),
    ("Uptime", "Service availability", "", "%", (99.0, 99.99), 2),
    ("Support", "Median first response", "", " min", (2.0, 45.0), 0),
    ("Growth", "Quarter over quarter", "+", "%", (1.0, 35.0), 1),
];

/// Builds a deck of `slide_count` slides with randomized KPI values.
pub fn generate<R: Rng>(rng: &mut R, slide_count: usize) -> Deck {
    let slides = (0..slide_count)
        .map(|i| {
            let (title, label, prefix, suffix, (low, high), decimals) = KPIS[i % KPIS.len()];
            let target = rng.random_range(low..high);

            SlideMarkup {
                title: Some(title.to_string()),
                caption: Some(format!("Indicator {} of {}", i + 1, slide_count)),
                counters: vec![CounterMarkup {
                    target: Some(AttrValue::Number(target)),
                    prefix: Some(prefix.to_string()),
                    suffix: Some(suffix.to_string()),
                    decimals: Some(AttrValue::Integer(decimals)),
                    duration: Some(AttrValue::Integer(rng.random_range(900..1800))),
                    start: None,
                    label: Some(label.to_string()),
                }],
                progress: Some(ProgressMarkup {
                    progress: Some(AttrValue::Integer(rng.random_range(5..=100))),
                    label: Some("of target".to_string()),
                }),
            }
        })
        .collect();

    Deck {
        title: Some("KPI Slider".to_string()),
        interval: None,
        dots: None,
        slides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_is_reproducible() {
        let a = generate(&mut StdRng::seed_from_u64(7), 8);
        let b = generate(&mut StdRng::seed_from_u64(7), 8);
        assert_eq!(a.slides.len(), 8);
        for (x, y) in a.slides.iter().zip(b.slides.iter()) {
            assert_eq!(x.counters[0].target, y.counters[0].target);
            assert_eq!(x.progress.as_ref().unwrap().progress, y.progress.as_ref().unwrap().progress);
        }
    }

    #[test]
    fn test_generated_values_in_range() {
        let deck = generate(&mut StdRng::seed_from_u64(1), 6);
        for (slide, kpi) in deck.slides.iter().zip(KPIS.iter()) {
            let target = slide.counters[0].target.as_ref().and_then(AttrValue::as_number).unwrap();
            let (low, high) = kpi.4;
            assert!(target >= low && target < high);
            let progress = slide.progress.as_ref().unwrap().progress.as_ref().and_then(AttrValue::as_number).unwrap();
            assert!((5.0..=100.0).contains(&progress));
        }
    }
}
