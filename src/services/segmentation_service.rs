// src/services/segmentation_service.rs

use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    graphql::{operations, FetchPolicy, GraphQLClient},
    models::{
        auth::User,
        segmentation::{
            AssignCompanyToSegmentPayload, CompanySegmentation, SegmentationData,
            SegmentationHierarchy, SegmentationOverview,
        },
        tenancy::Company,
    },
    services::{auth::AuthContext, role_helpers},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SegmentationDataForPlace {
    segmentation_data_for_place: SegmentationData,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WithoutSegmentationData {
    companies_without_segmentation: Vec<Company>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignData {
    assign_company_to_segment: Company,
}

#[derive(Deserialize)]
struct CompanyData {
    company: Option<Company>,
}

#[derive(Clone)]
pub struct SegmentationService {
    client: GraphQLClient,
    context: AuthContext,
}

impl SegmentationService {
    pub fn new(client: GraphQLClient, context: AuthContext) -> Self {
        Self { client, context }
    }

    fn segmenter_for_place(&self, place_id: i64) -> Result<User, AppError> {
        let user = self.context.require_user()?;
        if !role_helpers::can_manage_segmentation(&user)
            || !role_helpers::can_manage_specific_company(&user, place_id)
        {
            return Err(AppError::forbidden("segmentar empresas deste place"));
        }
        Ok(user)
    }

    pub async fn segmentation_data(&self, place_id: i64) -> Result<SegmentationData, AppError> {
        self.segmenter_for_place(place_id)?;

        let data: SegmentationDataForPlace = self
            .client
            .query(
                &operations::GET_SEGMENTATION_DATA_FOR_PLACE,
                json!({ "placeId": place_id }),
                FetchPolicy::CacheFirst,
            )
            .await?;

        Ok(data.segmentation_data_for_place)
    }

    pub async fn companies_without_segmentation(&self, place_id: i64) -> Result<Vec<Company>, AppError> {
        self.segmenter_for_place(place_id)?;

        let data: WithoutSegmentationData = self
            .client
            .query(
                &operations::COMPANIES_WITHOUT_SEGMENTATION,
                json!({ "placeId": place_id }),
                FetchPolicy::CacheFirst,
            )
            .await?;

        Ok(data.companies_without_segmentation)
    }

    /// Taxonomia do place, empresas sem classificação e as classificadas pela metade.
    pub async fn overview(&self, place_id: i64) -> Result<SegmentationOverview, AppError> {
        let data = self.segmentation_data(place_id).await?;
        let unsegmented = self.companies_without_segmentation(place_id).await?;

        let incomplete = data
            .companies
            .iter()
            .filter(|company| !company.is_unsegmented() && !company.is_fully_segmented())
            .map(|company| CompanySegmentation {
                company_id: company.id,
                company_name: company.name.clone(),
                hierarchy: company.segmentation_hierarchy(),
            })
            .collect();

        Ok(SegmentationOverview { place_id, data, unsegmented, incomplete })
    }

    pub async fn hierarchy(&self, company_id: i64) -> Result<SegmentationHierarchy, AppError> {
        let company = self.company(company_id).await?;
        self.segmenter_for_place(company.place_id)?;
        Ok(company.segmentation_hierarchy())
    }

    pub async fn assign_company_to_segment(
        &self,
        company_id: i64,
        payload: &AssignCompanyToSegmentPayload,
    ) -> Result<Company, AppError> {
        payload.validate()?;

        let company = self.company(company_id).await?;
        self.segmenter_for_place(company.place_id)?;

        // Regras da taxonomia são do servidor; os erros voltam para o formulário
        let data: AssignData = self
            .client
            .mutate(
                &operations::ASSIGN_COMPANY_TO_SEGMENT,
                json!({
                    "companyId": company_id,
                    "segmentId": payload.segment_id,
                    "categoryId": payload.category_id,
                    "subcategoryId": payload.subcategory_id,
                }),
                &["companiesWithoutSegmentation", "segmentationDataForPlace", "dashboardStats"],
            )
            .await?;

        let company = data.assign_company_to_segment;
        if !company.is_fully_segmented() {
            tracing::info!("Empresa {} ficou com segmentação incompleta.", company.id);
        }
        Ok(company)
    }

    async fn company(&self, company_id: i64) -> Result<Company, AppError> {
        self.context.require_user()?;

        let data: CompanyData = self
            .client
            .query(&operations::GET_COMPANY, json!({ "id": company_id }), FetchPolicy::CacheFirst)
            .await?;

        data.company
            .ok_or_else(|| AppError::NotFound(format!("empresa {}", company_id)))
    }
}
