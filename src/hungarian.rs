use std::{
    collections::VecDeque,
    ops::{Index, IndexMut},
};

use crate::{
    error::{GraphError, Result},
    matching::BipartiteGraph,
};

pub type Cost = i64;

/// Dense row-major cost matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Cost>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// Column assigned to each row.
    pub columns: Vec<usize>,
    pub cost: Cost,
}

impl CostMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut matrix = Self::new(rows.len(), cols);
        for (i, row) in rows.iter().enumerate() {
            matrix.set_row(i, row)?;
        }
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[Cost] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn set_row(&mut self, i: usize, values: &[Cost]) -> Result<()> {
        if values.len() != self.cols {
            return Err(GraphError::RaggedMatrix {
                row: i,
                expected: self.cols,
                found: values.len(),
            });
        }
        self.data[i * self.cols..(i + 1) * self.cols].copy_from_slice(values);
        Ok(())
    }

    pub fn cost_of(&self, columns: &[usize]) -> Cost {
        columns
            .iter()
            .enumerate()
            .map(|(i, &j)| self[(i, j)])
            .sum()
    }

    /// Minimum-cost perfect assignment of rows to columns.
    pub fn perfect_assignment(&self) -> Result<Assignment> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GraphError::EmptyMatrix);
        }
        if self.rows != self.cols {
            return Err(GraphError::NonSquareMatrix {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let size = self.rows;
        let mut reduced = self.clone();
        reduced.reduce_rows();
        reduced.reduce_columns();

        // Between two matching growths the marked column set strictly grows.
        let max_adjustments = size * size;
        for adjustments in 0..=max_adjustments {
            let assigned = reduced.zero_matching()?;

            if assigned.iter().all(Option::is_some) {
                let columns = assigned.into_iter().flatten().collect::<Vec<_>>();
                log::debug!(
                    "Assignment of size {} found after {} adjustments",
                    size,
                    adjustments
                );
                return Ok(Assignment {
                    cost: self.cost_of(&columns),
                    columns,
                });
            }

            reduced.adjust(&assigned);
        }

        Err(GraphError::AssignmentDiverged {
            adjustments: max_adjustments,
        })
    }

    fn reduce_rows(&mut self) {
        for i in 0..self.rows {
            let Some(&min) = self.row(i).iter().min() else {
                continue;
            };
            for j in 0..self.cols {
                self[(i, j)] -= min;
            }
        }
    }

    fn reduce_columns(&mut self) {
        for j in 0..self.cols {
            let Some(min) = (0..self.rows).map(|i| self[(i, j)]).min() else {
                continue;
            };
            for i in 0..self.rows {
                self[(i, j)] -= min;
            }
        }
    }

    /// Maximum matching restricted to zero cells, as the column of every row.
    fn zero_matching(&self) -> Result<Vec<Option<usize>>> {
        let mut zeros = BipartiteGraph::new(self.rows, self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                if self[(i, j)] == 0 {
                    zeros.connect(i, j);
                }
            }
        }

        let mut assigned = vec![None; self.rows];
        for (i, j) in zeros.maximum_matching()? {
            assigned[i] = Some(j);
        }
        Ok(assigned)
    }

    /// Covers all zeros with as many lines as there are assigned rows, then
    /// moves the smallest uncovered value from uncovered cells to the cells
    /// covered twice.
    fn adjust(&mut self, assigned: &[Option<usize>]) {
        let mut owner = vec![None; self.cols];
        for (i, j) in assigned.iter().enumerate() {
            if let Some(j) = *j {
                owner[j] = Some(i);
            }
        }

        let mut marked_rows = assigned.iter().map(Option::is_none).collect::<Vec<_>>();
        let mut marked_cols = vec![false; self.cols];
        let mut queue = (0..self.rows)
            .filter(|&i| marked_rows[i])
            .collect::<VecDeque<_>>();

        while let Some(i) = queue.pop_front() {
            for j in 0..self.cols {
                if self[(i, j)] != 0 || marked_cols[j] {
                    continue;
                }
                marked_cols[j] = true;
                if let Some(k) = owner[j] {
                    if !marked_rows[k] {
                        marked_rows[k] = true;
                        queue.push_back(k);
                    }
                }
            }
        }

        // Lines go through unmarked rows and marked columns.
        let min = (0..self.rows)
            .filter(|&i| marked_rows[i])
            .flat_map(|i| (0..self.cols).map(move |j| (i, j)))
            .filter(|&(_, j)| !marked_cols[j])
            .map(|(i, j)| self[(i, j)])
            .min();
        let Some(min) = min else {
            return;
        };

        for i in 0..self.rows {
            for j in 0..self.cols {
                match (marked_rows[i], marked_cols[j]) {
                    (true, false) => self[(i, j)] -= min,
                    (false, true) => self[(i, j)] += min,
                    _ => {}
                }
            }
        }
        log::trace!("Adjusted reduced matrix by {}", min);
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = Cost;

    fn index(&self, (i, j): (usize, usize)) -> &Cost {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for CostMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Cost {
        &mut self.data[i * self.cols + j]
    }
}
