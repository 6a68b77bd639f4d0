use std::fmt;

/// Attribute pool of an [`Obj`](crate::obj::Obj) that a face index points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    Position,
    Normal,
    TexCoord,
    Color,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pool::Position => "vertex",
            Pool::Normal => "vertex normal",
            Pool::TexCoord => "texture coordinate",
            Pool::Color => "vertex color",
        };
        f.write_str(s)
    }
}

/// Fatal conditions that abort a conversion. No partial scene is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("model name is empty")]
    EmptyModelName,
    #[error("{pool} index out of range: 0..{len} ∌ {index}")]
    IndexOutOfRange { pool: Pool, index: usize, len: usize },
    #[error("object references mesh {index}, but the model has {len} meshes")]
    MeshIndexOutOfRange { index: usize, len: usize },
    #[error("mesh {mesh:?} has no vertices")]
    NoVertices { mesh: String },
    #[error("mesh {mesh:?} needs {count} vertices, limit is {max}")]
    TooManyVertices {
        mesh: String,
        count: usize,
        max: usize,
    },
    #[error("mesh {mesh:?} needs {count} faces, limit is {max}")]
    TooManyFaces {
        mesh: String,
        count: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[test]
fn test_display() {
    let e = Error::IndexOutOfRange {
        pool: Pool::Normal,
        index: 12,
        len: 4,
    };
    assert_eq!(e.to_string(), "vertex normal index out of range: 0..4 ∌ 12");
    assert_eq!(Error::EmptyModelName.to_string(), "model name is empty");
}
