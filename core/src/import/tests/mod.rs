
use base64::Engine as _;

/// Wrap a JSON document and a binary buffer into a `.glb` container.
fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let json_pad = (4 - (json.len() % 4)) % 4;
    let json_chunk_len = json.len() + json_pad;
    let bin_pad = (4 - (bin.len() % 4)) % 4;
    let bin_chunk_len = bin.len() + bin_pad;
    let total_length = 12 + 8 + json_chunk_len + 8 + bin_chunk_len;

    let mut out = Vec::with_capacity(total_length);
    out.extend_from_slice(&0x46546C67u32.to_le_bytes()); // "glTF"
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total_length as u32).to_le_bytes());

    out.extend_from_slice(&(json_chunk_len as u32).to_le_bytes());
    out.extend_from_slice(&0x4E4F534Au32.to_le_bytes()); // "JSON"
    out.extend_from_slice(json.as_bytes());
    out.extend(std::iter::repeat_n(b' ', json_pad));

    out.extend_from_slice(&(bin_chunk_len as u32).to_le_bytes());
    out.extend_from_slice(&0x004E4942u32.to_le_bytes()); // "BIN\0"
    out.extend_from_slice(bin);
    out.extend(std::iter::repeat_n(0u8, bin_pad));
    out
}

/// Column-major translation matrix as 16 floats.
fn translation(x: f32) -> [f32; 16] {
    let mut m = [0.0; 16];
    m[0] = 1.0;
    m[5] = 1.0;
    m[10] = 1.0;
    m[15] = 1.0;
    m[12] = x;
    m
}

const POSITIONS_OFFSET: usize = 0;
const JOINTS_OFFSET: usize = 36;
const WEIGHTS_OFFSET: usize = 60;
const INDICES_OFFSET: usize = 108;
const IBM_OFFSET: usize = 116;
const BUFFER_LEN: usize = 308;

/// How the fixture stores its base color image.
enum FixtureImage {
    /// External file, written into the JSON as is.
    Uri(&'static str),
    /// Encoded bytes appended to the binary buffer.
    View(Vec<u8>),
    /// Encoded bytes in a base64 `data:` URI.
    DataUri(Vec<u8>),
}

/// A three-bone chain (`root -> mid -> tip`, one unit apart on X) skinning a
/// three-vertex mesh on node `body`.
///
/// Vertex 0 at the origin follows `root`, vertex 1 at (2,0,0) is split
/// between `mid` and `tip`, vertex 2 at (3,0,0) follows `tip`.
struct Fixture {
    mode: u32,
    joints: [[u16; 4]; 3],
    material: bool,
    image: FixtureImage,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            mode: 4,
            joints: [[0, 0, 0, 0], [1, 2, 0, 0], [2, 0, 0, 0]],
            material: true,
            image: FixtureImage::Uri("textures/body.png"),
        }
    }
}

impl Fixture {
    fn buffer(&self) -> Vec<u8> {
        let mut bin = Vec::with_capacity(BUFFER_LEN);
        for p in [[0.0f32, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]] {
            bin.extend(p.iter().flat_map(|v| v.to_le_bytes()));
        }
        assert_eq!(bin.len(), JOINTS_OFFSET);
        for quad in &self.joints {
            bin.extend(quad.iter().flat_map(|j| j.to_le_bytes()));
        }
        assert_eq!(bin.len(), WEIGHTS_OFFSET);
        for w in [[1.0f32, 0.0, 0.0, 0.0], [0.5, 0.5, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]] {
            bin.extend(w.iter().flat_map(|v| v.to_le_bytes()));
        }
        assert_eq!(bin.len(), INDICES_OFFSET);
        bin.extend([0u16, 1, 2].iter().flat_map(|i| i.to_le_bytes()));
        bin.extend([0u8, 0]);
        assert_eq!(bin.len(), IBM_OFFSET);
        for x in [0.0, -1.0, -2.0] {
            bin.extend(translation(x).iter().flat_map(|v| v.to_le_bytes()));
        }
        assert_eq!(bin.len(), BUFFER_LEN);
        if let FixtureImage::View(bytes) = &self.image {
            bin.extend_from_slice(bytes);
        }
        bin
    }

    fn image_json(&self) -> String {
        match &self.image {
            FixtureImage::Uri(uri) => format!(r#"{{ "uri": "{uri}" }}"#),
            FixtureImage::View(_) => r#"{ "bufferView": 5, "mimeType": "image/png" }"#.to_string(),
            FixtureImage::DataUri(bytes) => format!(
                r#"{{ "uri": "data:image/png;base64,{}" }}"#,
                base64::engine::general_purpose::STANDARD.encode(bytes)
            ),
        }
    }

    /// Extra buffer view holding the image bytes, if any.
    fn image_view_json(&self) -> String {
        match &self.image {
            FixtureImage::View(bytes) => format!(
                r#",
    {{ "buffer": 0, "byteOffset": {BUFFER_LEN}, "byteLength": {} }}"#,
                bytes.len()
            ),
            _ => String::new(),
        }
    }

    fn json(&self) -> String {
        let material = if self.material {
            r#", "material": 0"#
        } else {
            ""
        };
        r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0, 3] } ],
  "nodes": [
    { "name": "root", "children": [1] },
    { "name": "mid", "translation": [1.0, 0.0, 0.0], "children": [2] },
    { "name": "tip", "translation": [1.0, 0.0, 0.0] },
    { "name": "body", "mesh": 0, "skin": 0 }
  ],
  "meshes": [ {
    "name": "body",
    "primitives": [ {
      "attributes": { "POSITION": 0, "JOINTS_0": 1, "WEIGHTS_0": 2 },
      "indices": 3,
      "mode": MODE
      MATERIAL
    } ]
  } ],
  "skins": [ { "joints": [0, 1, 2], "inverseBindMatrices": 4 } ],
  "materials": [ { "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } } } ],
  "textures": [ { "source": 0 } ],
  "images": [ IMAGE ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [3.0, 0.0, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "VEC4" },
    { "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC4" },
    { "bufferView": 3, "componentType": 5123, "count": 3, "type": "SCALAR" },
    { "bufferView": 4, "componentType": 5126, "count": 3, "type": "MAT4" }
  ],
  "bufferViews": [
    { "buffer": 0, "byteOffset": POSITIONS_OFFSET, "byteLength": 36 },
    { "buffer": 0, "byteOffset": JOINTS_OFFSET, "byteLength": 24 },
    { "buffer": 0, "byteOffset": WEIGHTS_OFFSET, "byteLength": 48 },
    { "buffer": 0, "byteOffset": INDICES_OFFSET, "byteLength": 6 },
    { "buffer": 0, "byteOffset": IBM_OFFSET, "byteLength": 192 }IMAGE_VIEW
  ],
  "buffers": [ { "byteLength": TOTAL_LEN } ]
}"#
        .replace("MODE", &self.mode.to_string())
        .replace("MATERIAL", material)
        .replace("IMAGE_VIEW", &self.image_view_json())
        .replace("IMAGE", &self.image_json())
        .replace("TOTAL_LEN", &self.buffer().len().to_string())
        .replace("POSITIONS_OFFSET", &POSITIONS_OFFSET.to_string())
        .replace("JOINTS_OFFSET", &JOINTS_OFFSET.to_string())
        .replace("WEIGHTS_OFFSET", &WEIGHTS_OFFSET.to_string())
        .replace("INDICES_OFFSET", &INDICES_OFFSET.to_string())
        .replace("IBM_OFFSET", &IBM_OFFSET.to_string())
    }

    fn glb(&self) -> Vec<u8> {
        glb(&self.json(), &self.buffer())
    }
}
