//! Models compiled into the binary.

/// A low-poly cat: box body, head, legs and tail with pyramid ears.
/// 82 vertices, 54 quads and 12 triangles.
pub const MODEL_OBJ: &str = include_str!("../assets/cat.obj");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj;

    #[test]
    fn test_embedded_model_loads_strictly() {
        let mesh = obj::load_mesh_with(MODEL_OBJ, &obj::LoadOptions::strict()).unwrap();
        assert_eq!(mesh.vertices.len(), 82);
        assert_eq!(mesh.faces.len(), 66);
        assert_eq!(mesh.faces.iter().filter(|f| f.len() == 3).count(), 12);
    }
}
