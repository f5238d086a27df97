//! Fixed catalog of visual-style presets used to steer the generative model.

/// Style family, used to branch the texture/material vocabulary injected
/// into the scene-generation instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFamily {
    Clay,
    Felt,
    Stylized3d,
    Papercraft,
}

#[derive(Debug, Clone, Copy)]
pub struct VisualStyle {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt_keyword: &'static str,
    pub description: &'static str,
    pub family: StyleFamily,
}

pub const VISUAL_STYLES: &[VisualStyle] = &[
    VisualStyle {
        id: "clay",
        label: "Claymation",
        prompt_keyword: "claymation stop-motion, plasticine texture, tilt-shift",
        description: "Aardman-style clay puppets with visible fingerprints and handmade charm.",
        family: StyleFamily::Clay,
    },
    VisualStyle {
        id: "felt",
        label: "Felt & Wool",
        prompt_keyword: "needle-felted wool stop-motion, soft fuzzy fibers",
        description: "Cozy handcrafted felt puppets with stitched seams and fabric sets.",
        family: StyleFamily::Felt,
    },
    VisualStyle {
        id: "toon3d",
        label: "Stylized 3D",
        prompt_keyword: "stylized 3D animation, Pixar-quality render, soft global illumination",
        description: "Polished feature-film 3D with expressive characters and cinematic lighting.",
        family: StyleFamily::Stylized3d,
    },
    VisualStyle {
        id: "papercraft",
        label: "Papercraft",
        prompt_keyword: "cut-paper collage animation, layered cardstock, visible paper grain",
        description: "Flat layered paper cutouts with drop shadows and handmade edges.",
        family: StyleFamily::Papercraft,
    },
];

/// Looks up a preset by id, falling back to the first catalog entry when the
/// id is unknown.
pub fn resolve_style(style_id: &str) -> &'static VisualStyle {
    VISUAL_STYLES
        .iter()
        .find(|s| s.id == style_id)
        .unwrap_or(&VISUAL_STYLES[0])
}

/// Texture and material guidance for the scene instruction, branched on the
/// style family.
pub fn texture_guidance(family: StyleFamily) -> &'static str {
    match family {
        StyleFamily::Clay => {
            "Material notes: matte plasticine surfaces, subtle fingerprints and tool marks, \
             slight frame-to-frame wobble, miniature handmade props, tilt-shift depth of field."
        }
        StyleFamily::Felt => {
            "Material notes: fuzzy wool fibers catching rim light, visible stitching and seams, \
             fabric sets with soft edges, gentle static cling on fine hairs."
        }
        StyleFamily::Stylized3d => {
            "Material notes: subsurface scattering on skin, soft global illumination, \
             physically-based materials, shallow cinematic depth of field, filmic color grade."
        }
        StyleFamily::Papercraft => {
            "Material notes: layered cardstock with cut edges and paper grain, drop shadows \
             between layers, slight bend and flutter on movement, hand-painted gouache surfaces."
        }
    }
}
