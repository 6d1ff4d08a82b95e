//! CPU-side mesh data and glTF decoding

use crate::core::error::Error;

/// Triangle mesh data decoded from a glTF asset.
///
/// Positions/normals are required for rendering and surface sampling;
/// UVs and vertex colors are kept when the asset carries them (the terrain
/// uses vertex color as a grass-density mask, the blade uses UVs for the
/// alpha cutout and wind attenuation).
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Uniformly scale the geometry in place
    pub fn scale(&mut self, factor: f32) {
        for p in &mut self.positions {
            p[0] *= factor;
            p[1] *= factor;
            p[2] *= factor;
        }
    }

    /// Recompute smooth vertex normals from triangle geometry.
    ///
    /// Used when a decoded primitive carries no normals. Area-weighted
    /// accumulation, normalized per vertex.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![glam::Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let a = glam::Vec3::from(self.positions[tri[0] as usize]);
            let b = glam::Vec3::from(self.positions[tri[1] as usize]);
            let c = glam::Vec3::from(self.positions[tri[2] as usize]);
            let face = (b - a).cross(c - a);
            for &i in tri {
                accum[i as usize] += face;
            }
        }
        self.normals = accum
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }
}

/// Decode a glTF binary, merging every mesh primitive into one `MeshData`.
///
/// The terrain asset is authored as a single island mesh; merging keeps
/// the decoder robust if an exporter split it into primitives.
pub fn decode_merged(bytes: &[u8], name: &str) -> Result<MeshData, Error> {
    let (doc, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| Error::Asset(format!("{name}: {e}")))?;

    let mut out = MeshData {
        name: name.to_string(),
        ..Default::default()
    };
    for mesh in doc.meshes() {
        append_mesh(&mut out, &mesh, &buffers)?;
    }

    finish_mesh(out, name)
}

/// Decode the single sub-mesh whose name contains `marker`.
///
/// Exactly one mesh must match: zero matches means the asset doesn't carry
/// the expected LOD naming, more than one means the marker is ambiguous.
/// Both are load-time errors rather than undefined instancing behavior.
pub fn decode_named(bytes: &[u8], marker: &str, name: &str) -> Result<MeshData, Error> {
    let (doc, buffers, _images) =
        gltf::import_slice(bytes).map_err(|e| Error::Asset(format!("{name}: {e}")))?;

    // Exporters put the name on the mesh or on the node carrying it;
    // accept either, deduplicated by mesh index.
    let mut matches: Vec<_> = doc
        .meshes()
        .filter(|m| m.name().is_some_and(|n| n.contains(marker)))
        .collect();
    if matches.is_empty() {
        matches = doc
            .nodes()
            .filter(|n| n.name().is_some_and(|s| s.contains(marker)))
            .filter_map(|n| n.mesh())
            .collect();
        matches.sort_by_key(|m| m.index());
        matches.dedup_by_key(|m| m.index());
    }

    let mesh = match matches.as_slice() {
        [] => {
            return Err(Error::Asset(format!(
                "{name}: no sub-mesh named with marker {marker:?}"
            )));
        }
        [one] => one,
        many => {
            return Err(Error::Asset(format!(
                "{name}: marker {marker:?} matches {} sub-meshes",
                many.len()
            )));
        }
    };

    let mut out = MeshData {
        name: mesh.name().unwrap_or(name).to_string(),
        ..Default::default()
    };
    append_mesh(&mut out, mesh, &buffers)?;

    finish_mesh(out, name)
}

/// Append all of a glTF mesh's primitives into `out`, offsetting indices.
fn append_mesh(
    out: &mut MeshData,
    mesh: &gltf::Mesh<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<(), Error> {
    for prim in mesh.primitives() {
        let reader = prim.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

        let base = out.positions.len() as u32;
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| Error::Asset(format!("{}: primitive without positions", out.name)))?
            .collect();
        let count = positions.len();
        out.positions.extend(positions);

        if let Some(normals) = reader.read_normals() {
            out.normals.extend(normals);
        } else {
            // Keep lengths aligned; recomputed below
            out.normals.extend(std::iter::repeat([0.0; 3]).take(count));
        }
        if let Some(uvs) = reader.read_tex_coords(0) {
            out.uvs.extend(uvs.into_f32());
        }
        if let Some(colors) = reader.read_colors(0) {
            out.colors.extend(colors.into_rgb_f32());
        }

        if let Some(indices) = reader.read_indices() {
            out.indices.extend(indices.into_u32().map(|i| i + base));
        } else {
            out.indices.extend(base..base + count as u32);
        }
    }
    Ok(())
}

fn finish_mesh(mut out: MeshData, name: &str) -> Result<MeshData, Error> {
    if out.positions.is_empty() || out.indices.is_empty() {
        return Err(Error::Asset(format!("{name}: contains no triangle geometry")));
    }
    if out.normals.iter().all(|n| *n == [0.0; 3]) {
        out.recompute_normals();
    }
    log::info!(
        "Decoded {}: {} vertices, {} triangles, colors={}, uvs={}",
        out.name,
        out.vertex_count(),
        out.triangle_count(),
        out.has_colors(),
        out.has_uvs()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData {
            name: "quad".into(),
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0],
            ],
            normals: vec![[0.0; 3]; 4],
            uvs: vec![],
            colors: vec![],
            indices: vec![0, 2, 1, 0, 3, 2],
        }
    }

    #[test]
    fn test_scale() {
        let mut mesh = quad();
        mesh.scale(3.0);
        assert_eq!(mesh.positions[1], [3.0, 0.0, 0.0]);
        assert_eq!(mesh.positions[2], [3.0, 0.0, 3.0]);
    }

    #[test]
    fn test_recompute_normals_flat_quad() {
        let mut mesh = quad();
        mesh.recompute_normals();
        // Winding chosen so the quad faces +Y
        for n in &mesh.normals {
            assert!((n[1] - 1.0).abs() < 0.001, "normal {n:?}");
        }
    }

    #[test]
    fn test_triangle_count() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_count(), 4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_merged(b"not a gltf file", "bad").unwrap_err();
        assert!(matches!(err, Error::Asset(_)));
    }
}
