//! src/ui/node.rs
//!
//! Recursive layout Node + Panel trait used across the UI.
//!
//! Panels borrow the chart state for a single frame, so the tree is rebuilt
//! every frame and never outlives the borrow.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}

/// Node tree used to compose the UI each frame.
pub enum Node<'a> {
    Group {
        direction: Direction,
        constraints: Vec<Constraint>,
        children: Vec<Node<'a>>,
    },
    Leaf {
        panel: Box<dyn Panel + 'a>,
    },
}

impl Node<'_> {
    /// Draw the node into the given area. Children beyond the constraint count are not drawn.
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        match self {
            Node::Group {
                direction,
                constraints,
                children,
            } => {
                let chunks = Layout::default()
                    .direction(*direction)
                    .constraints(constraints.clone())
                    .split(area);
                for (child, chunk) in children.iter().zip(chunks.iter()) {
                    child.draw(f, *chunk);
                }
            }
            Node::Leaf { panel } => {
                panel.draw(f, area);
            }
        }
    }
}

/// Helper: create a group node.
pub fn group<'a>(
    direction: Direction,
    constraints: Vec<Constraint>,
    children: Vec<Node<'a>>,
) -> Node<'a> {
    Node::Group {
        direction,
        constraints,
        children,
    }
}

/// Helper: create a leaf node.
pub fn leaf<'a>(panel: impl Panel + 'a) -> Node<'a> {
    Node::Leaf {
        panel: Box::new(panel),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    struct Probe<'a> {
        seen: &'a RefCell<Vec<Rect>>,
    }

    impl Panel for Probe<'_> {
        fn draw(&self, _f: &mut Frame<'_>, area: Rect) {
            self.seen.borrow_mut().push(area);
        }
    }

    #[test]
    fn groups_split_area_between_children() {
        let seen = RefCell::new(Vec::new());
        let root = group(
            Direction::Vertical,
            vec![Constraint::Length(3), Constraint::Min(0)],
            vec![
                leaf(Probe { seen: &seen }),
                group(
                    Direction::Horizontal,
                    vec![Constraint::Percentage(50), Constraint::Percentage(50)],
                    vec![leaf(Probe { seen: &seen }), leaf(Probe { seen: &seen })],
                ),
            ],
        );

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|f| root.draw(f, f.area())).unwrap();
        // the tree borrows `seen` until it is dropped
        drop(root);

        let seen = seen.into_inner();
        assert_eq!(
            seen,
            vec![
                Rect::new(0, 0, 40, 3),
                Rect::new(0, 3, 20, 7),
                Rect::new(20, 3, 20, 7),
            ]
        );
    }
}
