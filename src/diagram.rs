//! Hand-positioned flow diagrams and the geometry needed to draw them.
//!
//! Coordinates follow screen conventions: `x` grows to the right, `y` grows downward, and a node's
//! position is its top-left corner. Nothing is laid out automatically. Edges leave a node from the
//! middle of its bottom side and enter the next through the middle of its top side, routed as
//! orthogonal "step" polylines.

use crate::section::FlowchartRef;

/// Node width when the style does not set one.
pub const DEFAULT_NODE_WIDTH: f64 = 150.0;
/// Inner padding on every side of a node label.
pub const NODE_PADDING: f64 = 10.0;
/// Height of one label line.
pub const LINE_HEIGHT: f64 = 18.0;
/// Diagram units covered by one terminal column at zoom 1.
pub const UNITS_PER_COLUMN: f64 = 6.0;
/// Diagram units covered by one terminal row at zoom 1. Cells are about twice as tall as wide.
pub const UNITS_PER_ROW: f64 = 12.0;
/// Vertical distance a step edge travels before turning when it has to double back.
const STEP_OFFSET: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq)]
/// A point in diagram units.
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downward.
    pub y: f64,
}

impl Point {
    #[must_use]
    /// Builds a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    #[must_use]
    /// Centre of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    #[must_use]
    /// Grows every side by `margin`.
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Role of a node in the flow: where it starts, a step along it, or an outcome.
pub enum NodeKind {
    /// Entry point.
    Input,
    /// Intermediate step.
    Default,
    /// Terminal outcome.
    Output,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Background of a node box.
pub enum Fill {
    /// `#111737`, used for entry and outcome nodes.
    Navy,
    /// `#FFF539`, used for decisions and checkpoints.
    Yellow,
    /// `#FFFFFF`, used for API calls.
    White,
}

impl Fill {
    #[must_use]
    /// RGB triple of the fill.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Navy => (0x11, 0x17, 0x37),
            Self::Yellow => (0xFF, 0xF5, 0x39),
            Self::White => (0xFF, 0xFF, 0xFF),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Visual attributes of a node.
pub struct NodeStyle {
    /// Box background.
    pub fill: Fill,
    /// Explicit width; [`DEFAULT_NODE_WIDTH`] when absent.
    pub width: Option<f64>,
    /// Dashed border, used for optional steps.
    pub dashed: bool,
    /// Drawn faded.
    pub dimmed: bool,
}

impl NodeStyle {
    const fn solid(fill: Fill) -> Self {
        Self {
            fill,
            width: None,
            dashed: false,
            dimmed: false,
        }
    }

    const fn sized(fill: Fill, width: f64) -> Self {
        Self {
            fill,
            width: Some(width),
            dashed: false,
            dimmed: false,
        }
    }

    const fn optional(width: f64) -> Self {
        Self {
            fill: Fill::White,
            width: Some(width),
            dashed: true,
            dimmed: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A labelled box at a fixed position.
pub struct Node {
    /// Identifier referenced by edges.
    pub id: &'static str,
    /// Label, one entry per `\n`-separated line.
    pub label: &'static str,
    /// Top-left corner.
    pub position: Point,
    /// Role in the flow.
    pub kind: NodeKind,
    /// Visual attributes.
    pub style: NodeStyle,
}

impl Node {
    #[must_use]
    /// Box occupied by the node: width from the style, height from the label line count.
    pub fn rect(&self) -> Rect {
        let lines = self.label.lines().count().max(1);
        #[allow(clippy::cast_precision_loss)]
        let text_height = lines as f64 * LINE_HEIGHT;
        Rect {
            x: self.position.x,
            y: self.position.y,
            width: self.style.width.unwrap_or(DEFAULT_NODE_WIDTH),
            height: text_height + 2.0 * NODE_PADDING,
        }
    }

    #[must_use]
    /// Outgoing handle, middle of the bottom side.
    pub fn source_handle(&self) -> Point {
        let rect = self.rect();
        Point::new(rect.center().x, rect.bottom())
    }

    #[must_use]
    /// Incoming handle, middle of the top side.
    pub fn target_handle(&self) -> Point {
        let rect = self.rect();
        Point::new(rect.center().x, rect.y)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A directed connection between two nodes.
pub struct Edge {
    /// Identifier, unique within the diagram.
    pub id: &'static str,
    /// Id of the node the edge leaves.
    pub source: &'static str,
    /// Id of the node the edge enters.
    pub target: &'static str,
    /// Optional text placed at the middle of the route.
    pub label: Option<&'static str>,
    /// Part of the main path.
    pub animated: bool,
    /// Drawn in a muted grey, used for side paths.
    pub muted: bool,
}

impl Edge {
    const fn main(id: &'static str, source: &'static str, target: &'static str) -> Self {
        Self {
            id,
            source,
            target,
            label: None,
            animated: true,
            muted: false,
        }
    }

    const fn side(id: &'static str, source: &'static str, target: &'static str) -> Self {
        Self {
            id,
            source,
            target,
            label: None,
            animated: false,
            muted: true,
        }
    }

    const fn labelled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A titled node/edge graph.
pub struct Diagram {
    /// Caption shown above the drawing.
    pub title: &'static str,
    /// Nodes in declaration order.
    pub nodes: Vec<Node>,
    /// Edges in declaration order.
    pub edges: Vec<Edge>,
}

const fn node(
    id: &'static str,
    kind: NodeKind,
    x: f64,
    y: f64,
    label: &'static str,
    style: NodeStyle,
) -> Node {
    Node {
        id,
        label,
        position: Point::new(x, y),
        kind,
        style,
    }
}

impl Diagram {
    #[must_use]
    /// The built-in diagram a section refers to.
    pub fn for_ref(reference: FlowchartRef) -> Self {
        match reference {
            FlowchartRef::Authentication => Self::authentication_flow(),
            FlowchartRef::TeamCreation => Self::team_creation_flow(),
        }
    }

    #[must_use]
    /// Login or signup through OTP verification to token issuance.
    pub fn authentication_flow() -> Self {
        Self {
            title: "Authentication Flow",
            nodes: vec![
                node(
                    "start",
                    NodeKind::Input,
                    250.0,
                    0.0,
                    "Start: User wants to login/signup",
                    NodeStyle::solid(Fill::Navy),
                ),
                node(
                    "choose-method",
                    NodeKind::Default,
                    250.0,
                    100.0,
                    "Choose Method\nPhone or Email?",
                    NodeStyle::solid(Fill::Yellow),
                ),
                node(
                    "phone-login",
                    NodeKind::Default,
                    50.0,
                    200.0,
                    "POST /api/v1/auth/phone-login\n\nPhoneNumber\nCountryCode",
                    NodeStyle::sized(Fill::White, 200.0),
                ),
                node(
                    "email-login",
                    NodeKind::Default,
                    450.0,
                    200.0,
                    "POST /api/v1/auth/email-login\n\nEmail",
                    NodeStyle::sized(Fill::White, 200.0),
                ),
                node(
                    "otp-sent",
                    NodeKind::Default,
                    250.0,
                    350.0,
                    "OTP Sent\nOtpToken received",
                    NodeStyle::solid(Fill::Yellow),
                ),
                node(
                    "verify-otp",
                    NodeKind::Default,
                    250.0,
                    450.0,
                    "POST /api/v1/auth/verify-otp\n\nOtpToken\nOtp (4 digits)",
                    NodeStyle::sized(Fill::White, 250.0),
                ),
                node(
                    "success",
                    NodeKind::Output,
                    250.0,
                    600.0,
                    "Success!\nAccessToken & RefreshToken\nUser logged in",
                    NodeStyle::solid(Fill::Navy),
                ),
                node(
                    "resend-otp",
                    NodeKind::Default,
                    500.0,
                    450.0,
                    "POST /api/v1/auth/resend-otp\n\n(Optional)",
                    NodeStyle::optional(200.0),
                ),
            ],
            edges: vec![
                Edge::main("e1", "start", "choose-method"),
                Edge::main("e2", "choose-method", "phone-login").labelled("Phone"),
                Edge::main("e3", "choose-method", "email-login").labelled("Email"),
                Edge::main("e4", "phone-login", "otp-sent"),
                Edge::main("e5", "email-login", "otp-sent"),
                Edge::main("e6", "otp-sent", "verify-otp"),
                Edge::main("e7", "verify-otp", "success"),
                Edge::side("e8", "otp-sent", "resend-otp").labelled("Need new OTP?"),
                Edge::side("e9", "resend-otp", "otp-sent"),
            ],
        }
    }

    #[must_use]
    /// Game-id linking, team creation and validation up to the created team.
    pub fn team_creation_flow() -> Self {
        Self {
            title: "Team Creation Flow",
            nodes: vec![
                node(
                    "start",
                    NodeKind::Input,
                    250.0,
                    0.0,
                    "User wants to create a team",
                    NodeStyle::solid(Fill::Navy),
                ),
                node(
                    "check-game",
                    NodeKind::Default,
                    250.0,
                    100.0,
                    "Does team have GameId?",
                    NodeStyle::solid(Fill::Yellow),
                ),
                node(
                    "link-game",
                    NodeKind::Default,
                    50.0,
                    200.0,
                    "PUT /api/v1/auth/profile\n\nAdd GameIds array\n(gameid, usergameid)",
                    NodeStyle::sized(Fill::White, 200.0),
                ),
                node(
                    "create-team",
                    NodeKind::Default,
                    250.0,
                    300.0,
                    "POST /api/v1/team\n\nName (required)\nGameId (optional)\nTeamSize, Logo, etc.",
                    NodeStyle::sized(Fill::White, 250.0),
                ),
                node(
                    "validate",
                    NodeKind::Default,
                    250.0,
                    450.0,
                    "Validation:\n- User has game ID (if GameId provided)\n- Team name valid\n- User is active",
                    NodeStyle::solid(Fill::Yellow),
                ),
                node(
                    "team-created",
                    NodeKind::Output,
                    250.0,
                    600.0,
                    "Team Created!\nOwner added as first member\nTeamId returned",
                    NodeStyle::solid(Fill::Navy),
                ),
                node(
                    "generate-invite",
                    NodeKind::Default,
                    500.0,
                    600.0,
                    "GET /api/v1/team/{teamId}/invite-link\n\n(Next step)",
                    NodeStyle::optional(200.0),
                ),
            ],
            edges: vec![
                Edge::main("e1", "start", "check-game"),
                Edge::main("e2", "check-game", "link-game").labelled("Yes"),
                Edge::main("e3", "check-game", "create-team").labelled("No"),
                Edge::main("e4", "link-game", "create-team"),
                Edge::main("e5", "create-team", "validate"),
                Edge::main("e6", "validate", "team-created"),
                Edge::side("e7", "team-created", "generate-invite"),
            ],
        }
    }

    #[must_use]
    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[must_use]
    /// Rectangle enclosing every node; empty at the origin for a diagram without nodes.
    pub fn bounds(&self) -> Rect {
        self.nodes
            .iter()
            .map(Node::rect)
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or(Rect {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            })
    }

    #[must_use]
    /// Step route of an edge, from the source handle to the target handle.
    ///
    /// Returns `None` when either endpoint names a node that does not exist.
    pub fn edge_route(&self, edge: &Edge) -> Option<Vec<Point>> {
        let start = self.node(edge.source)?.source_handle();
        let end = self.node(edge.target)?.target_handle();
        Some(step_route(start, end))
    }
}

/// Orthogonal route between a bottom handle and a top handle.
///
/// When the target lies below the source the route drops to the midpoint height, runs across and
/// drops again. Otherwise it leaves downward, crosses over at the midpoint column and climbs to
/// enter the target from above.
#[must_use]
pub fn step_route(start: Point, end: Point) -> Vec<Point> {
    let mut points = vec![start];
    if end.y > start.y {
        let mid_y = (start.y + end.y) / 2.0;
        points.push(Point::new(start.x, mid_y));
        points.push(Point::new(end.x, mid_y));
    } else {
        let below = start.y + STEP_OFFSET;
        let above = end.y - STEP_OFFSET;
        let mid_x = (start.x + end.x) / 2.0;
        points.push(Point::new(start.x, below));
        points.push(Point::new(mid_x, below));
        points.push(Point::new(mid_x, above));
        points.push(Point::new(end.x, above));
    }
    points.push(end);
    points.dedup();
    points
}

#[must_use]
/// Where an edge label sits: the middle of the route's middle segment.
pub fn label_anchor(route: &[Point]) -> Option<Point> {
    let first = route.len().checked_sub(2)? / 2;
    let (a, b) = (route.get(first)?, route.get(first + 1)?);
    Some(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
}

#[must_use]
/// Splits a segment into dashes of `dash` length separated by equal gaps.
pub fn dashed_segments(from: Point, to: Point, dash: f64) -> Vec<(Point, Point)> {
    let length = (to.x - from.x).hypot(to.y - from.y);
    if dash <= 0.0 || length <= dash {
        return vec![(from, to)];
    }
    let (ux, uy) = ((to.x - from.x) / length, (to.y - from.y) / length);
    let mut dashes = Vec::new();
    let mut travelled = 0.0;
    while travelled < length {
        let end = (travelled + dash).min(length);
        dashes.push((
            Point::new(from.x + ux * travelled, from.y + uy * travelled),
            Point::new(from.x + ux * end, from.y + uy * end),
        ));
        travelled += 2.0 * dash;
    }
    dashes
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Camera over a diagram: what point sits in the middle of the drawing area, and how magnified.
pub struct Viewport {
    /// Diagram point shown at the centre of the area.
    pub center: Point,
    /// Magnification; 1.0 maps [`UNITS_PER_COLUMN`] units to one column.
    pub zoom: f64,
}

impl Viewport {
    /// Smallest magnification reachable.
    pub const MIN_ZOOM: f64 = 0.25;
    /// Largest magnification reachable.
    pub const MAX_ZOOM: f64 = 4.0;
    /// Factor applied by one zoom step.
    pub const ZOOM_STEP: f64 = 1.25;
    /// Margin kept around the content when fitting, as a share of its size.
    const FIT_MARGIN: f64 = 0.08;

    #[must_use]
    /// Centres `content` and picks the largest zoom that shows all of it in `columns` x `rows`.
    pub fn fit(content: Rect, columns: u16, rows: u16) -> Self {
        let padded = content.inflate(content.width.max(content.height) * Self::FIT_MARGIN);
        let across = f64::from(columns.max(1)) * UNITS_PER_COLUMN / padded.width.max(1.0);
        let down = f64::from(rows.max(1)) * UNITS_PER_ROW / padded.height.max(1.0);
        Self {
            center: content.center(),
            zoom: across.min(down).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM),
        }
    }

    #[must_use]
    /// Diagram-space rectangle visible in an area of `columns` x `rows` cells.
    pub fn bounds(&self, columns: u16, rows: u16) -> Rect {
        let width = f64::from(columns) * UNITS_PER_COLUMN / self.zoom;
        let height = f64::from(rows) * UNITS_PER_ROW / self.zoom;
        Rect {
            x: self.center.x - width / 2.0,
            y: self.center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Moves the camera by a number of terminal cells.
    pub fn pan(&mut self, columns: f64, rows: f64) {
        self.center.x += columns * UNITS_PER_COLUMN / self.zoom;
        self.center.y += rows * UNITS_PER_ROW / self.zoom;
    }

    /// Magnifies one step.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * Self::ZOOM_STEP).min(Self::MAX_ZOOM);
    }

    /// Shrinks one step.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / Self::ZOOM_STEP).max(Self::MIN_ZOOM);
    }

    #[must_use]
    /// Whether full labels fit: each label line gets at least one terminal row.
    pub fn shows_full_labels(&self) -> bool {
        LINE_HEIGHT * self.zoom >= UNITS_PER_ROW
    }
}

#[cfg(test)]
#[path = "tests/diagram.rs"]
mod tests;
