//! Non-text page content that text must not reflow around.

use crate::model::{PageInput, PageRect, Rect};

/// Vector graphics thinner than this are rules or underlines.
const MIN_GRAPHIC_THICKNESS: f32 = 1.25;

/// Floor of the cumulative soft-overlap area that disqualifies a region.
const MIN_SOFT_OVERLAP_AREA: f32 = 2.0;

/// Soft-overlap allowance as a fraction of the median line height squared.
const SOFT_OVERLAP_RATIO: f32 = 0.2;

/// Obstacle rectangles of one page, in layout space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Obstacles {
    /// Images, annotations and form fields: any overlap counts
    pub hard: Vec<Rect>,
    /// Hard obstacles plus vector graphics: cumulative overlap counts
    pub soft: Vec<Rect>,
}

impl Obstacles {
    /// Collect and convert a page's obstacles.
    pub fn collect(page: &PageInput) -> Self {
        let convert = |rects: &[PageRect]| -> Vec<Rect> {
            rects.iter().map(|r| Rect::from_page(r, page.height)).collect()
        };

        let mut hard = convert(&page.images);
        hard.extend(convert(&page.annotations));
        hard.extend(convert(&page.form_fields));

        let mut soft = hard.clone();
        soft.extend(
            convert(&page.graphics)
                .into_iter()
                .filter(|r| r.width.min(r.height) >= MIN_GRAPHIC_THICKNESS),
        );

        Self { hard, soft }
    }

    /// Check if the page has no obstacles at all.
    pub fn is_empty(&self) -> bool {
        self.soft.is_empty()
    }

    /// Whether `rect` is disqualified by the obstacles.
    ///
    /// Any positive intersection with a hard obstacle counts; soft
    /// obstacles count only once their summed intersection exceeds
    /// `max(2, median_height² × 0.2)`.
    pub fn overlap(&self, rect: &Rect, median_height: f32) -> bool {
        if self.hard.iter().any(|o| rect.intersection_area(o) > 0.0) {
            return true;
        }
        let allowance = MIN_SOFT_OVERLAP_AREA.max(median_height * median_height * SOFT_OVERLAP_RATIO);
        let total: f32 = self.soft.iter().map(|o| rect.intersection_area(o)).sum();
        total > allowance
    }

    /// Distance from `rect` to the closest soft obstacle.
    pub fn nearest(&self, rect: &Rect) -> f32 {
        nearest_distance(rect, &self.soft)
    }
}

/// Distance to the closest obstacle, `+∞` when there are none.
pub fn nearest_distance(rect: &Rect, obstacles: &[Rect]) -> f32 {
    obstacles
        .iter()
        .map(|o| rect.distance_to(o))
        .fold(f32::INFINITY, f32::min)
}
