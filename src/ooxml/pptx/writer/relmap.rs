/// Relationship ID mapper for tracking relationships during presentation generation.
///
/// Relationships are created first; the mapper then hands the real rIds to the
/// XML generators so the markup never needs placeholder IDs.
use std::collections::HashMap;

/// Maps slide elements to their relationship IDs.
///
/// Organized per slide, as each slide has its own set of relationships.
#[derive(Debug, Default)]
pub struct RelationshipMapper {
    /// Maps (slide_index, image_index_in_slide) to relationship ID
    image_ids: HashMap<(usize, usize), String>,
    /// Maps slide_index to the rId of the slide in presentation.xml
    slide_ids: HashMap<usize, String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rId of the `image_index_in_slide`-th picture on a slide.
    pub fn add_image(&mut self, slide_index: usize, image_index_in_slide: usize, rel_id: String) {
        self.image_ids
            .insert((slide_index, image_index_in_slide), rel_id);
    }

    pub fn get_image_id(&self, slide_index: usize, image_index_in_slide: usize) -> Option<&str> {
        self.image_ids
            .get(&(slide_index, image_index_in_slide))
            .map(|s| s.as_str())
    }

    /// Record the rId under which presentation.xml refers to a slide.
    pub fn add_slide(&mut self, slide_index: usize, rel_id: String) {
        self.slide_ids.insert(slide_index, rel_id);
    }

    pub fn get_slide_id(&self, slide_index: usize) -> Option<&str> {
        self.slide_ids.get(&slide_index).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_per_slide() {
        let mut mapper = RelationshipMapper::new();
        mapper.add_image(0, 0, "rId2".to_string());
        mapper.add_image(1, 0, "rId3".to_string());
        mapper.add_slide(1, "rId8".to_string());

        assert_eq!(mapper.get_image_id(0, 0), Some("rId2"));
        assert_eq!(mapper.get_image_id(1, 0), Some("rId3"));
        assert_eq!(mapper.get_image_id(1, 1), None);
        assert_eq!(mapper.get_slide_id(1), Some("rId8"));
        assert_eq!(mapper.get_slide_id(0), None);
    }
}
