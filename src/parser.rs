use std::{
    io::{BufRead, BufReader, Read},
    str::{FromStr, SplitWhitespace},
};

use crate::{
    error::{GraphError, Result},
    graph::{Capacity, CapacityGraph},
    hungarian::{Cost, CostMatrix},
    matching::BipartiteGraph,
};

/// Max-flow instance in DIMACS format, vertices made 0 based.
#[derive(Clone, Debug)]
pub struct FlowInstance {
    pub network: CapacityGraph,
    pub source: usize,
    pub sink: usize,
}

fn parse_error(line: usize, reason: impl Into<String>) -> GraphError {
    GraphError::Parse {
        line,
        reason: reason.into(),
    }
}

fn next_value<T: FromStr>(parts: &mut SplitWhitespace, line: usize, what: &str) -> Result<T> {
    let token = parts
        .next()
        .ok_or_else(|| parse_error(line, format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {} '{}'", what, token)))
}

/// 1 based vertex id, checked against the vertex count.
fn next_vertex(
    parts: &mut SplitWhitespace,
    line: usize,
    what: &str,
    count: usize,
) -> Result<usize> {
    let id: usize = next_value(parts, line, what)?;
    if id == 0 || id > count {
        return Err(parse_error(
            line,
            format!("{} {} out of range 1..={}", what, id, count),
        ));
    }
    Ok(id - 1)
}

impl FlowInstance {
    /// Reads `c` comments, one `p max N M` line, `n ID s|t` designators and
    /// `a U V CAP` arcs.
    pub fn read(input: impl Read) -> Result<Self> {
        let mut network: Option<CapacityGraph> = None;
        let mut source = None;
        let mut sink = None;
        let mut declared_arcs: usize = 0;
        let mut arcs: usize = 0;

        for (idx, line) in BufReader::new(input).lines().enumerate() {
            let line_no = idx + 1;
            let line = line?;
            let mut parts = line.split_whitespace();

            let Some(first) = parts.next() else {
                continue;
            };

            match first {
                "c" => continue,
                "p" => {
                    if network.is_some() {
                        return Err(parse_error(line_no, "duplicate problem line"));
                    }
                    let kind: String = next_value(&mut parts, line_no, "problem kind")?;
                    if kind != "max" {
                        return Err(parse_error(
                            line_no,
                            format!("expected 'max' problem, got '{}'", kind),
                        ));
                    }
                    let n: usize = next_value(&mut parts, line_no, "vertex count")?;
                    declared_arcs = next_value(&mut parts, line_no, "arc count")?;
                    network = Some(CapacityGraph::new(n));
                }
                "n" | "a" => {
                    let Some(network) = network.as_mut() else {
                        return Err(parse_error(line_no, "missing problem line"));
                    };
                    let n = network.vertex_count();

                    if first == "n" {
                        let id = next_vertex(&mut parts, line_no, "vertex", n)?;
                        match parts.next() {
                            Some("s") => source = Some(id),
                            Some("t") => sink = Some(id),
                            other => {
                                return Err(parse_error(
                                    line_no,
                                    format!("expected 's' or 't', got {:?}", other),
                                ))
                            }
                        }
                    } else {
                        let u = next_vertex(&mut parts, line_no, "arc tail", n)?;
                        let v = next_vertex(&mut parts, line_no, "arc head", n)?;
                        let capacity: Capacity = next_value(&mut parts, line_no, "capacity")?;
                        if capacity < 0 {
                            return Err(parse_error(line_no, "negative capacity"));
                        }
                        network.connect(u, v, capacity);
                        arcs += 1;
                    }
                }
                other => {
                    return Err(parse_error(
                        line_no,
                        format!("unknown line type '{}'", other),
                    ))
                }
            }
        }

        let network = network.ok_or_else(|| parse_error(0, "missing problem line"))?;
        let source = source.ok_or_else(|| parse_error(0, "missing source designator"))?;
        let sink = sink.ok_or_else(|| parse_error(0, "missing sink designator"))?;

        if arcs != declared_arcs {
            log::warn!("Declared {} arcs but read {}", declared_arcs, arcs);
        }

        Ok(Self {
            network,
            source,
            sink,
        })
    }
}

/// Reads one whitespace separated row of costs per line; `c` lines and
/// blank lines are skipped.
pub fn read_cost_matrix(input: impl Read) -> Result<CostMatrix> {
    let mut rows = vec![];

    for (idx, line) in BufReader::new(input).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('c') {
            continue;
        }

        let row = trimmed
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<Cost>()
                    .map_err(|_| parse_error(idx + 1, format!("invalid cost '{}'", token)))
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    CostMatrix::from_rows(rows)
}

/// Reads `p match L R M` followed by `e l r` edges, both sides 1 based.
pub fn read_bipartite(input: impl Read) -> Result<BipartiteGraph> {
    let mut graph: Option<BipartiteGraph> = None;

    for (idx, line) in BufReader::new(input).lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            None | Some("c") => continue,
            Some("p") => {
                let kind: String = next_value(&mut parts, line_no, "problem kind")?;
                if kind != "match" {
                    return Err(parse_error(
                        line_no,
                        format!("expected 'match' problem, got '{}'", kind),
                    ));
                }
                let left = next_value(&mut parts, line_no, "left count")?;
                let right = next_value(&mut parts, line_no, "right count")?;
                graph = Some(BipartiteGraph::new(left, right));
            }
            Some("e") => {
                let Some(graph) = graph.as_mut() else {
                    return Err(parse_error(line_no, "missing problem line"));
                };
                let l = next_vertex(&mut parts, line_no, "left vertex", graph.left_count())?;
                let r = next_vertex(&mut parts, line_no, "right vertex", graph.right_count())?;
                graph.connect(l, r);
            }
            Some(other) => {
                return Err(parse_error(
                    line_no,
                    format!("unknown line type '{}'", other),
                ))
            }
        }
    }

    graph.ok_or_else(|| parse_error(0, "missing problem line"))
}
