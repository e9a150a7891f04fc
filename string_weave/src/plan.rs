use serde::{Deserialize, Serialize};

use crate::{planner::Termination, pegs::PegLayout, Error, Float, Grid};

/// Finished peg sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan<S> {
    sequence: Vec<usize>,
    total_cost: S,
    termination: Option<Termination>,
}

impl<S: Float> Plan<S> {
    pub fn new(sequence: Vec<usize>, total_cost: S, termination: Option<Termination>) -> Self {
        Self {
            sequence,
            total_cost,
            termination,
        }
    }

    /// Visited pegs, start peg first.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    pub fn total_cost(&self) -> S {
        self.total_cost
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn lines(&self) -> usize {
        self.sequence.len().saturating_sub(1)
    }

    /// One peg index per line, in winding order.
    pub fn build_instructions(&self) -> String {
        let mut instructions = String::new();
        for peg in &self.sequence {
            instructions.push_str(&peg.to_string());
            instructions.push('\n');
        }
        instructions
    }

    pub fn build_svg(
        &self,
        layout: &PegLayout<S>,
        grid: Grid,
        line_tickness: f32,
    ) -> Result<svg::Document, Error> {
        let mut doc =
            svg::Document::new().set("viewBox", (0, 0, grid.width, grid.height));
        doc = doc.add(
            svg::node::element::Rectangle::new()
                .set("width", grid.width)
                .set("height", grid.height)
                .set("fill", "white"),
        );
        for step in self.sequence.windows(2) {
            let start = layout.peg(step[0])?.position;
            let end = layout.peg(step[1])?.position;
            doc = doc.add(
                svg::node::element::Line::new()
                    .set("x1", start.x as i64)
                    .set("y1", start.y as i64)
                    .set("x2", end.x as i64)
                    .set("y2", end.y as i64)
                    .set("stroke", "black")
                    .set("stroke-width", format!("{:.4}", line_tickness))
                    .set("opacity", 1),
            );
        }
        for peg in layout.pegs() {
            doc = doc.add(
                svg::node::element::Circle::new()
                    .set("cx", peg.position.x as i64)
                    .set("cy", peg.position.y as i64)
                    .set("r", 2)
                    .set("fill", "gray"),
            );
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_list_every_peg() {
        let plan = Plan::new(vec![0, 18, 3], 2.5f64, Some(Termination::MaxLinesReached));
        assert_eq!(plan.build_instructions(), "0\n18\n3\n");
        assert_eq!(plan.lines(), 2);
    }

    #[test]
    fn svg_has_one_line_per_step() {
        let layout = PegLayout::<f64>::for_grid(12, Grid::square(100)).expect("valid layout");
        let plan = Plan::new(vec![0, 6, 3, 9], 1.0, None);
        let svg = plan
            .build_svg(&layout, Grid::square(100), 1.0)
            .expect("pegs in range")
            .to_string();
        assert_eq!(svg.matches("<line").count(), 3);
        assert_eq!(svg.matches("<circle").count(), 12);
    }

    #[test]
    fn svg_rejects_foreign_pegs() {
        let layout = PegLayout::<f64>::for_grid(12, Grid::square(100)).expect("valid layout");
        let plan = Plan::new(vec![0, 40], 1.0, None);
        assert!(matches!(
            plan.build_svg(&layout, Grid::square(100), 1.0),
            Err(Error::InvalidPegIndex { index: 40, .. })
        ));
    }
}
