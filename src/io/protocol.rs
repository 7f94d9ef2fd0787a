//! Line-based level and plan protocol with the controlling server
//!
//! Inbound: the level description stream (`#domain`, `#levelname`,
//! `#colors`, `#initial`, `#goal`, `#end`), parsed once into the initial
//! configuration. Outbound: one semicolon-joined joint action per line, each
//! followed by exactly one acknowledgement line from the server. Lines
//! prefixed with `#` are comments the server ignores.

use std::io::{BufRead, Write};
use std::sync::Arc;

use ndarray::Array2;

use crate::io::configuration::{MAX_AGENTS, MAX_BOX_TYPES, MAX_GRID_DIMENSION};
use crate::io::error::{self, PlannerError, Result};
use crate::level::{Color, Level, Position};
use crate::search::action::Action;
use crate::search::state::State;

/// Line source tracking 1-based line numbers for error reporting
struct Lines<'a, R> {
    reader: &'a mut R,
    number: usize,
}

impl<R: BufRead> Lines<'_, R> {
    /// Read the next line, stripped of its terminator
    ///
    /// `pending` names the section an unexpected end of stream would have
    /// belonged to.
    fn next(&mut self, pending: &'static str) -> Result<String> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|source| error::protocol("level read", source))?;
        if read == 0 {
            return Err(PlannerError::MissingSection { section: pending });
        }
        self.number += 1;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// Read the next line and require it to be an exact section header
    fn expect_header(&mut self, header: &'static str) -> Result<()> {
        let line = self.next(header)?;
        if line == header {
            Ok(())
        } else {
            Err(error::malformed_level(
                self.number,
                &format!("expected '{header}', found '{line}'"),
            ))
        }
    }
}

/// Parse a level description into its initial configuration
///
/// # Errors
///
/// Returns an error if the stream ends early, a section header is missing
/// or out of order, a color or grid glyph is invalid, agent ids are not
/// contiguous from 0, an agent lacks a color, or the grid exceeds the
/// supported dimensions.
pub fn parse_level<R: BufRead>(reader: &mut R) -> Result<Arc<State>> {
    let mut lines = Lines { reader, number: 0 };

    lines.expect_header("#domain")?;
    lines.next("#levelname")?; // domain name, unused
    lines.expect_header("#levelname")?;
    let name = lines.next("#colors")?;
    lines.expect_header("#colors")?;

    let mut agent_colors: [Option<Color>; MAX_AGENTS] = [None; MAX_AGENTS];
    let mut box_colors: [Option<Color>; MAX_BOX_TYPES] = [None; MAX_BOX_TYPES];
    let mut line = lines.next("#initial")?;
    while !line.starts_with('#') {
        parse_color_line(&line, lines.number, &mut agent_colors, &mut box_colors)?;
        line = lines.next("#initial")?;
    }
    require_header(&line, "#initial", lines.number)?;

    let mut initial_rows: Vec<(usize, String)> = Vec::new();
    line = lines.next("#goal")?;
    while !line.starts_with('#') {
        initial_rows.push((lines.number, line));
        line = lines.next("#goal")?;
    }
    require_header(&line, "#goal", lines.number)?;

    let mut goal_rows: Vec<(usize, String)> = Vec::new();
    line = lines.next("#end")?;
    while !line.starts_with('#') {
        goal_rows.push((lines.number, line));
        line = lines.next("#end")?;
    }
    require_header(&line, "#end", lines.number)?;

    build_initial_state(name, &agent_colors, &box_colors, &initial_rows, &goal_rows)
}

/// Send the client name line opening the handshake
///
/// # Errors
///
/// Returns an error if the stream write or flush fails
pub fn send_name<W: Write>(writer: &mut W, name: &str) -> Result<()> {
    writeln!(writer, "{name}").map_err(|source| error::protocol("handshake", source))?;
    writer
        .flush()
        .map_err(|source| error::protocol("handshake", source))
}

/// Send a `#`-prefixed comment line the server ignores
///
/// # Errors
///
/// Returns an error if the stream write or flush fails
pub fn send_comment<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    writeln!(writer, "#{text}").map_err(|source| error::protocol("comment", source))?;
    writer
        .flush()
        .map_err(|source| error::protocol("comment", source))
}

/// Emit a plan joint action by joint action, consuming one acknowledgement
/// line from the server after each
///
/// Action names appear in fixed agent-id order, joined by semicolons.
///
/// # Errors
///
/// Returns an error if a write fails or the server closes the
/// acknowledgement stream early
pub fn submit_plan<W: Write, R: BufRead>(
    plan: &[Vec<Action>],
    writer: &mut W,
    reader: &mut R,
) -> Result<()> {
    for joint_action in plan {
        let step = joint_action
            .iter()
            .map(|action| action.name)
            .collect::<Vec<_>>()
            .join(";");
        writeln!(writer, "{step}").map_err(|source| error::protocol("plan submission", source))?;
        writer
            .flush()
            .map_err(|source| error::protocol("plan submission", source))?;

        // Consume the server's response so its output buffer never fills.
        let mut acknowledgement = String::new();
        let read = reader
            .read_line(&mut acknowledgement)
            .map_err(|source| error::protocol("plan acknowledgement", source))?;
        if read == 0 {
            return Err(error::protocol(
                "plan acknowledgement",
                std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "server closed the stream"),
            ));
        }
    }
    Ok(())
}

fn require_header(line: &str, header: &'static str, number: usize) -> Result<()> {
    if line == header {
        Ok(())
    } else {
        Err(error::malformed_level(
            number,
            &format!("expected '{header}', found '{line}'"),
        ))
    }
}

/// Record one `color: entity, entity, ...` assignment line
fn parse_color_line(
    line: &str,
    number: usize,
    agent_colors: &mut [Option<Color>; MAX_AGENTS],
    box_colors: &mut [Option<Color>; MAX_BOX_TYPES],
) -> Result<()> {
    let (color_name, entities) = line.split_once(':').ok_or_else(|| {
        error::malformed_level(number, &"color line must read 'color: entity, ...'")
    })?;
    let color = Color::from_name(color_name.trim()).ok_or_else(|| PlannerError::UnknownColor {
        line: number,
        name: color_name.trim().to_owned(),
    })?;

    for entity in entities.split(',') {
        let glyph = single_char(entity.trim()).ok_or_else(|| {
            error::malformed_level(
                number,
                &format!("invalid entity '{}' in color assignment", entity.trim()),
            )
        })?;
        let slot = match glyph {
            '0'..='9' => agent_colors.get_mut(glyph as usize - '0' as usize),
            'A'..='Z' => box_colors.get_mut(glyph as usize - 'A' as usize),
            _ => None,
        };
        match slot {
            Some(entry) => *entry = Some(color),
            None => {
                return Err(error::malformed_level(
                    number,
                    &format!("invalid entity '{glyph}' in color assignment"),
                ));
            }
        }
    }
    Ok(())
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) => Some(glyph),
        _ => None,
    }
}

/// Assemble the shared level data and initial configuration from the parsed
/// sections
fn build_initial_state(
    name: String,
    agent_colors: &[Option<Color>; MAX_AGENTS],
    box_colors: &[Option<Color>; MAX_BOX_TYPES],
    initial_rows: &[(usize, String)],
    goal_rows: &[(usize, String)],
) -> Result<Arc<State>> {
    let rows = initial_rows.len();
    let cols = initial_rows
        .iter()
        .map(|(_, text)| text.chars().count())
        .max()
        .unwrap_or(0);
    if rows == 0 || cols == 0 {
        return Err(error::malformed_level(0, &"empty #initial section"));
    }
    if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
        return Err(PlannerError::LevelTooLarge {
            rows,
            cols,
            max: MAX_GRID_DIMENSION,
        });
    }

    let mut walls = Array2::from_elem((rows, cols), false);
    let mut boxes = Array2::<u8>::zeros((rows, cols));
    let mut agent_positions: [Option<Position>; MAX_AGENTS] = [None; MAX_AGENTS];

    for (row, (number, text)) in initial_rows.iter().enumerate() {
        for (col, glyph) in text.chars().enumerate() {
            match glyph {
                '+' => {
                    if let Some(cell) = walls.get_mut((row, col)) {
                        *cell = true;
                    }
                }
                '0'..='9' => {
                    let slot = agent_positions
                        .get_mut(glyph as usize - '0' as usize)
                        .filter(|slot| slot.is_none())
                        .ok_or_else(|| {
                            error::malformed_level(
                                *number,
                                &format!("agent '{glyph}' appears more than once"),
                            )
                        })?;
                    *slot = Some(Position::new(row as i32, col as i32));
                }
                'A'..='Z' => {
                    if let Some(cell) = boxes.get_mut((row, col)) {
                        *cell = glyph as u8;
                    }
                }
                ' ' => {}
                other => {
                    return Err(error::malformed_level(
                        *number,
                        &format!("invalid glyph '{other}' in #initial"),
                    ));
                }
            }
        }
    }

    let num_agents = agent_positions
        .iter()
        .take_while(|position| position.is_some())
        .count();
    if num_agents == 0 {
        return Err(error::malformed_level(0, &"level contains no agents"));
    }
    if agent_positions.iter().skip(num_agents).any(Option::is_some) {
        return Err(error::malformed_level(
            0,
            &"agent ids must be contiguous from 0",
        ));
    }
    let agents: Vec<Position> = agent_positions.iter().flatten().copied().collect();

    let mut colors = Vec::with_capacity(num_agents);
    for (id, color) in agent_colors.iter().take(num_agents).enumerate() {
        match color {
            Some(color) => colors.push(*color),
            None => {
                return Err(error::malformed_level(
                    0,
                    &format!("agent '{id}' has no color assignment"),
                ));
            }
        }
    }

    let goals = build_goal_grid(goal_rows, rows, cols, num_agents)?;

    let level = Arc::new(Level {
        name,
        walls,
        goals,
        agent_colors: colors,
        box_colors: *box_colors,
    });
    Ok(Arc::new(State::initial(level, agents, boxes)))
}

/// Build the goal grid; wall and blank glyphs impose no constraint
fn build_goal_grid(
    goal_rows: &[(usize, String)],
    rows: usize,
    cols: usize,
    num_agents: usize,
) -> Result<Array2<u8>> {
    let mut goals = Array2::<u8>::zeros((rows, cols));

    for (row, (number, text)) in goal_rows.iter().enumerate() {
        if row >= rows {
            return Err(error::malformed_level(
                *number,
                &"#goal section taller than the initial grid",
            ));
        }
        if text.chars().count() > cols {
            return Err(error::malformed_level(
                *number,
                &"#goal row wider than the initial grid",
            ));
        }
        for (col, glyph) in text.chars().enumerate() {
            match glyph {
                '0'..='9' => {
                    if glyph as usize - '0' as usize >= num_agents {
                        return Err(error::malformed_level(
                            *number,
                            &format!("goal references missing agent '{glyph}'"),
                        ));
                    }
                    if let Some(cell) = goals.get_mut((row, col)) {
                        *cell = glyph as u8;
                    }
                }
                'A'..='Z' => {
                    if let Some(cell) = goals.get_mut((row, col)) {
                        *cell = glyph as u8;
                    }
                }
                // Walls and free cells repeat here without constraining.
                _ => {}
            }
        }
    }

    Ok(goals)
}
