#![cfg(feature = "std")]

use std::{fmt::Display, path::Path};

use csv::ReaderBuilder;
use tobin_bas::{
    Columns,
    avec::{Entity, TypeCodes},
};

const PATH: &str = "fixtures/sample.bas";

#[test]
fn decode_slice_sample() {
    let data = std::fs::read(PATH).unwrap();

    let entities = tobin_bas::avec::slice::entities(&data, TypeCodes::default())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    Validator::new(PATH).validate(&entities);
}

#[test]
fn decode_reader_sample() {
    let file = std::fs::File::open(PATH).unwrap();

    let entities = tobin_bas::avec::reader::entities(file, TypeCodes::default())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    Validator::new(PATH).validate(&entities);
}

#[test]
fn decode_slice_one_entity_at_a_time() {
    let data = std::fs::read(PATH).unwrap();
    let codes = TypeCodes::default();

    let i = &mut 0;
    let mut entities = vec![];
    while *i < data.len() {
        entities.push(tobin_bas::avec::decode_slice(&data, i, &codes).unwrap());
    }

    assert_eq!(*i, data.len());
    Validator::new(PATH).validate(&entities);
}

#[test]
fn decode_reader_one_entity_at_a_time() {
    let mut file = std::io::BufReader::new(std::fs::File::open(PATH).unwrap());
    let codes = TypeCodes::default();

    let first = tobin_bas::avec::decode_reader(&mut file, &codes).unwrap();
    let second = tobin_bas::avec::decode_reader(&mut file, &codes).unwrap();

    assert_eq!(first.offset(), 0);
    assert_eq!(first.coordinates().len(), 3);
    assert_eq!(first.annotations().len(), 1);
    assert_eq!(second.offset(), 82 + 3 * 34 + 82);
    assert_eq!(second.header().name_format_type, "3");
}

#[test]
fn sample_polygons() {
    let data = std::fs::read(PATH).unwrap();

    let entities = tobin_bas::avec::slice::entities(&data, TypeCodes::default())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let parts: Vec<Vec<usize>> = entities
        .iter()
        .map(|e| e.polygons().map(<[_]>::len).collect())
        .collect();

    assert_eq!(parts, [vec![3], vec![2], vec![1], vec![]]);
}

/// Expected rows of `entity, record, column, value`, in the order records are
/// published: header, annotations, then coordinates.
struct Validator(Vec<Vec<String>>);

impl Validator {
    fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().with_extension("csv");

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap();

        let expected = reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect();

        Self(expected)
    }

    fn validate(self, entities: &[Entity]) {
        let mut found = vec![];

        for (n, entity) in entities.iter().enumerate() {
            found.push(row(n, "Entity", "Offset", &entity.offset()));

            let mut publish = |record: &str, columns: &dyn Columns| {
                columns.visit_columns(&mut |name, value| found.push(row(n, record, name, value)));
            };

            publish("Header", entity.header());
            for annotation in entity.annotations() {
                publish("Annotation", annotation);
            }
            for coordinate in entity.coordinates() {
                publish("Coordinate", coordinate);
            }
        }

        assert_eq!(found.len(), self.0.len());
        for (found, expected) in found.iter().zip(&self.0) {
            assert_eq!(found, expected);
        }
    }
}

fn row(n: usize, record: &str, column: &str, value: &dyn Display) -> Vec<String> {
    vec![
        n.to_string(),
        record.to_string(),
        column.to_string(),
        value.to_string(),
    ]
}
