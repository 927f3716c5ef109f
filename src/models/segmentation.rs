// src/models/segmentation.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::tenancy::Company;

// Taxonomia de três níveis: Segment ⊇ Category ⊇ Subcategory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    // Uma categoria pode pertencer a vários segmentos; o primeiro é o "dono"
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: i64,
    pub name: String,
    pub category: Option<Category>,
}

/// Caminho de classificação resolvido de uma Company.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationHierarchy {
    pub segment: Option<Segment>,
    pub category: Option<Category>,
    pub subcategory: Option<Subcategory>,
    pub has_full_hierarchy: bool,
}

// Resposta de GetSegmentationDataForPlace
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationData {
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
    #[serde(default)]
    pub companies: Vec<Company>,
}

// Página de segmentação: dados do place + empresas pendentes
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationOverview {
    pub place_id: i64,
    pub data: SegmentationData,
    pub unsegmented: Vec<Company>,
    pub incomplete: Vec<CompanySegmentation>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanySegmentation {
    pub company_id: i64,
    pub company_name: String,
    pub hierarchy: SegmentationHierarchy,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_assignment_path"))]
pub struct AssignCompanyToSegmentPayload {
    #[validate(range(min = 1, message = "Segmento inválido."))]
    pub segment_id: i64,
    pub category_id: Option<i64>,
    pub subcategory_id: Option<i64>,
}

fn validate_assignment_path(payload: &AssignCompanyToSegmentPayload) -> Result<(), ValidationError> {
    if payload.subcategory_id.is_some() && payload.category_id.is_none() {
        return Err(ValidationError::new("subcategory_without_category")
            .with_message("Uma subcategoria exige uma categoria.".into()));
    }
    Ok(())
}

impl Category {
    /// O segmento "dono" da categoria é o primeiro associado.
    pub fn primary_segment(&self) -> Option<&Segment> {
        self.segments.first()
    }
}

impl Company {
    /// Resolve Segment/Category/Subcategory a partir do que a empresa carrega.
    ///
    /// A subcategoria tem precedência: a categoria dela (quando presente)
    /// substitui a categoria direta. Só há hierarquia completa quando
    /// subcategoria → categoria → primeiro segmento resolvem.
    pub fn segmentation_hierarchy(&self) -> SegmentationHierarchy {
        let subcategory = self.subcategory.clone();

        let category = subcategory
            .as_ref()
            .and_then(|sub| sub.category.clone())
            .or_else(|| self.category.clone());

        let segment = category
            .as_ref()
            .and_then(|cat| cat.primary_segment().cloned());

        let has_full_hierarchy = self
            .subcategory
            .as_ref()
            .and_then(|sub| sub.category.as_ref())
            .and_then(|cat| cat.primary_segment())
            .is_some();

        SegmentationHierarchy {
            segment,
            category,
            subcategory,
            has_full_hierarchy,
        }
    }

    pub fn is_fully_segmented(&self) -> bool {
        self.segmentation_hierarchy().has_full_hierarchy
    }

    /// Sem nenhum nível de classificação.
    pub fn is_unsegmented(&self) -> bool {
        self.category.is_none() && self.subcategory.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: i64) -> Segment {
        Segment { id, name: format!("Segmento {}", id) }
    }

    fn category(id: i64, segments: Vec<Segment>) -> Category {
        Category { id, name: format!("Categoria {}", id), segments }
    }

    fn company(category: Option<Category>, subcategory: Option<Subcategory>) -> Company {
        Company {
            id: 1,
            name: "Padaria Central".into(),
            description: None,
            place_id: 7,
            is_active: true,
            category,
            subcategory,
        }
    }

    #[test]
    fn full_path_is_complete() {
        let sub = Subcategory {
            id: 30,
            name: "Pães".into(),
            category: Some(category(20, vec![segment(10), segment(11)])),
        };
        let hierarchy = company(None, Some(sub)).segmentation_hierarchy();

        assert!(hierarchy.has_full_hierarchy);
        assert_eq!(hierarchy.segment, Some(segment(10)));
        assert_eq!(hierarchy.category.map(|c| c.id), Some(20));
        assert_eq!(hierarchy.subcategory.map(|s| s.id), Some(30));
    }

    #[test]
    fn category_only_is_partial() {
        let hierarchy = company(Some(category(20, vec![segment(10)])), None).segmentation_hierarchy();

        assert_eq!(hierarchy.segment, Some(segment(10)));
        assert_eq!(hierarchy.category.map(|c| c.id), Some(20));
        assert!(hierarchy.subcategory.is_none());
        assert!(!hierarchy.has_full_hierarchy);
    }

    #[test]
    fn category_without_segment_leaves_segment_undefined() {
        let hierarchy = company(Some(category(20, vec![])), None).segmentation_hierarchy();

        assert!(hierarchy.segment.is_none());
        assert!(!hierarchy.has_full_hierarchy);
    }

    #[test]
    fn subcategory_without_category_is_incomplete() {
        let sub = Subcategory { id: 30, name: "Pães".into(), category: None };
        let c = company(Some(category(20, vec![segment(10)])), Some(sub));

        // A categoria direta ainda aparece, mas o caminho pela subcategoria não fecha
        assert!(!c.is_fully_segmented());
        assert_eq!(c.segmentation_hierarchy().segment, Some(segment(10)));
    }

    #[test]
    fn subcategory_whose_category_has_no_segment_is_incomplete() {
        let sub = Subcategory { id: 30, name: "Pães".into(), category: Some(category(20, vec![])) };
        assert!(!company(None, Some(sub)).is_fully_segmented());
    }

    #[test]
    fn empty_company_is_unsegmented() {
        let c = company(None, None);
        assert!(c.is_unsegmented());
        assert_eq!(
            c.segmentation_hierarchy(),
            SegmentationHierarchy { segment: None, category: None, subcategory: None, has_full_hierarchy: false }
        );
    }

    #[test]
    fn subcategory_requires_category_in_assignment() {
        let payload = AssignCompanyToSegmentPayload { segment_id: 1, category_id: None, subcategory_id: Some(3) };
        assert!(payload.validate().is_err());

        let payload = AssignCompanyToSegmentPayload { segment_id: 1, category_id: Some(2), subcategory_id: Some(3) };
        assert!(payload.validate().is_ok());
    }
}
