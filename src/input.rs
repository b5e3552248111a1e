use std::io::prelude::*;
use std::str::FromStr;

use bstr::ByteSlice;
use fxhash::FxHashMap;

use gfa::gfa::Line;
use gfa::parser::GFAParser;

use crate::error::LoadError;
use crate::graph::{Edge, Graph};
use crate::weight::Weight;

/// A graph together with the map from vertex index back to the name
/// the vertex had in the input.
pub struct LabeledGraph<W> {
    pub graph: Graph<W>,
    pub inv_names: Vec<String>,
}

impl<W> LabeledGraph<W> {
    pub fn name(&self, v: usize) -> Option<&str> {
        self.inv_names.get(v).map(|name| name.as_str())
    }
}

/// Assigns dense indices to names in order of first appearance.
#[derive(Default)]
struct NameTable {
    name_map: FxHashMap<String, usize>,
    inv_names: Vec<String>,
}

impl NameTable {
    fn get_ix(&mut self, name: &str) -> usize {
        if let Some(ix) = self.name_map.get(name) {
            *ix
        } else {
            let ix = self.inv_names.len();
            self.name_map.insert(name.to_string(), ix);
            self.inv_names.push(name.to_string());
            ix
        }
    }
}

/// Reads a whitespace separated edge list, one `from to weight` triple
/// per line. Blank lines and lines starting with `#` are skipped.
///
/// Vertex tokens are treated as names and numbered in order of first
/// appearance, unless a `vertices N` header line comes first, in
/// which case every token must be an index in `0..N`.
pub fn from_edge_list_reader<W, T>(reader: &mut T, directed: bool) -> Result<LabeledGraph<W>, LoadError>
where
    W: Weight + FromStr,
    T: BufRead,
{
    let mut names = NameTable::default();
    let mut fixed_count: Option<usize> = None;
    let mut edges: Vec<Edge<W>> = Vec::new();

    for (ix, line) in reader.lines().enumerate() {
        let line_no = ix + 1;
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields[0] == "vertices" {
            if !edges.is_empty() || fixed_count.is_some() {
                return Err(LoadError::parse(line_no, "vertices header must come first"));
            }
            let count = fields
                .get(1)
                .and_then(|count| count.parse::<usize>().ok())
                .ok_or_else(|| LoadError::parse(line_no, "expected `vertices <count>`"))?;
            fixed_count = Some(count);
            continue;
        }

        if fields.len() != 3 {
            return Err(LoadError::parse(
                line_no,
                format!("expected `from to weight`, found {} fields", fields.len()),
            ));
        }

        let weight = fields[2]
            .parse::<W>()
            .map_err(|_| LoadError::parse(line_no, format!("invalid weight `{}`", fields[2])))?;

        let (from, to) = match fixed_count {
            Some(_) => {
                let parse_ix = |field: &str| {
                    field
                        .parse::<usize>()
                        .map_err(|_| LoadError::parse(line_no, format!("invalid vertex index `{}`", field)))
                };
                (parse_ix(fields[0])?, parse_ix(fields[1])?)
            }
            None => (names.get_ix(fields[0]), names.get_ix(fields[1])),
        };

        edges.push(Edge::new(from, to, weight));
    }

    let (vertex_count, inv_names) = match fixed_count {
        Some(count) => (count, (0..count).map(|v| v.to_string()).collect()),
        None => (names.inv_names.len(), names.inv_names),
    };

    let graph = Graph::<W>::build(vertex_count, edges, directed)?;
    Ok(LabeledGraph { graph, inv_names })
}

/// Constructs an undirected graph from a GFA input stream. Segments
/// become vertices and every link becomes an edge of weight one,
/// regardless of orientation. Lines that fail to parse are skipped.
pub fn from_gfa_reader<T: BufRead>(reader: &mut T) -> Result<LabeledGraph<u64>, LoadError> {
    let parser: GFAParser<Vec<u8>, ()> = GFAParser::new();

    let mut names = NameTable::default();
    let mut edges: Vec<Edge<u64>> = Vec::new();
    let mut skipped = 0usize;

    for line in reader.split(b'\n') {
        let line = line?;
        let bytes = line.trim_end_with(|c| c == '\r');
        if bytes.is_empty() {
            continue;
        }

        match parser.parse_gfa_line(bytes) {
            Ok(Line::Segment(segment)) => {
                names.get_ix(&segment.name.to_str_lossy());
            }
            Ok(Line::Link(link)) => {
                let from_ix = names.get_ix(&link.from_segment.to_str_lossy());
                let to_ix = names.get_ix(&link.to_segment.to_str_lossy());
                edges.push(Edge::new(from_ix, to_ix, 1));
            }
            Ok(_) => (),
            Err(_) => skipped += 1,
        }
    }

    tracing::debug!(
        segments = names.inv_names.len(),
        links = edges.len(),
        skipped,
        "parsed GFA"
    );

    let graph = Graph::<u64>::undirected(names.inv_names.len(), edges)?;
    Ok(LabeledGraph {
        graph,
        inv_names: names.inv_names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn edge_list_with_names() {
        let input = "# depots\n\
                     a b 4\n\
                     \n\
                     b c 1\n\
                     a c 2\n";

        let labeled: LabeledGraph<i64> = from_edge_list_reader(&mut input.as_bytes(), false).unwrap();

        assert_eq!(labeled.graph.vertex_count(), 3);
        assert_eq!(labeled.graph.edge_count(), 3);
        assert_eq!(labeled.inv_names, vec!["a", "b", "c"]);
        assert_eq!(labeled.name(2), Some("c"));

        let neighbors: Vec<_> = labeled.graph.neighbors(0).collect();
        assert_eq!(neighbors, vec![(1, 4), (2, 2)]);
    }

    #[test]
    fn edge_list_with_header_keeps_isolated_vertices() {
        let input = "vertices 4\n0 1 1.5\n1 2 0.5\n";
        let labeled: LabeledGraph<f64> = from_edge_list_reader(&mut input.as_bytes(), true).unwrap();

        assert_eq!(labeled.graph.vertex_count(), 4);
        assert!(labeled.graph.is_directed());
        assert_eq!(labeled.graph.neighbors(3).count(), 0);
        assert_eq!(labeled.name(3), Some("3"));
    }

    #[test]
    fn edge_list_errors() {
        let bad_weight = "a b x\n";
        let err = from_edge_list_reader::<i64, _>(&mut bad_weight.as_bytes(), false)
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));

        let short = "# header\na b\n";
        let err = from_edge_list_reader::<i64, _>(&mut short.as_bytes(), false)
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));

        let out_of_range = "vertices 2\n0 5 1\n";
        let err = from_edge_list_reader::<i64, _>(&mut out_of_range.as_bytes(), false)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            LoadError::Graph(GraphError::InvalidVertexIndex {
                index: 5,
                vertex_count: 2
            })
        ));
    }

    #[test]
    fn gfa_links_become_unit_edges() {
        let gfa = "H\tVN:Z:1.0\n\
                   S\t11\tACCTT\n\
                   S\t12\tTCAAGG\n\
                   S\t13\tCTTGATT\n\
                   L\t11\t+\t12\t-\t4M\n\
                   L\t12\t-\t13\t+\t5M\n\
                   L\t11\t+\t13\t+\t3M\n";

        let labeled = from_gfa_reader(&mut gfa.as_bytes()).unwrap();

        assert_eq!(labeled.inv_names, vec!["11", "12", "13"]);
        assert_eq!(labeled.graph.edge_count(), 3);
        assert!(!labeled.graph.is_directed());
        assert!(labeled.graph.edges().all(|edge| edge.weight == 1));
    }
}
