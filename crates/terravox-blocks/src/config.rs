use serde::Deserialize;

use crate::types::TextureId;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub textures: Option<TexturesDef>,
}

/// Per-face atlas tiles. A specific face wins over `side` (the four lateral
/// faces), which wins over `all`; anything left unset uses tile 0.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TexturesDef {
    pub all: Option<TextureId>,
    pub side: Option<TextureId>,
    pub back: Option<TextureId>,
    pub front: Option<TextureId>,
    pub top: Option<TextureId>,
    pub bottom: Option<TextureId>,
    pub left: Option<TextureId>,
    pub right: Option<TextureId>,
}

impl TexturesDef {
    /// Resolves to tile ids in face order (back, front, top, bottom, left, right).
    pub fn resolve(&self) -> [TextureId; 6] {
        let all = self.all.unwrap_or(0);
        let side = self.side.unwrap_or(all);
        [
            self.back.unwrap_or(side),
            self.front.unwrap_or(side),
            self.top.unwrap_or(all),
            self.bottom.unwrap_or(all),
            self.left.unwrap_or(side),
            self.right.unwrap_or(side),
        ]
    }
}
