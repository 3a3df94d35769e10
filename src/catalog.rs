//! The catalog's resources, one [`AdminResource`] impl per backend route.
//!
//! Each marker type pins down the paths and wire quirks of its route:
//! which endpoints live under `api/v1` and which don't, which routes
//! delete via HTTP DELETE versus POST-to-a-delete-path, and which create
//! endpoints take query parameters instead of a JSON body. These constants
//! reproduce the deployed backend's conventions and are not interchangeable.

use crate::client::ApiClient;
use crate::envelope::Ack;
use crate::errors::ApiError;
use crate::models::{
    Brand, BrandCreate, Detail, DetailCreate, DetailGroup, DetailGroupCreate, DetailGroupLink,
    DetailGroupLinkCreate, DetailTagCreate, DetailTagLink, FinalLinkCreate, FinalLinkRow, Model,
    ModelCreate, ModelYearGroupCreate, ModelYearGroupLink, PromoCode, PromoCodeCreate, RecordId,
    Tag, TagCreate, YearGroup, YearGroupCreate,
};
use crate::resource::{AdminResource, CreateStyle, DeleteRoute};

pub struct Brands;

impl AdminResource for Brands {
    type ListModel = Brand;
    type CreateModel = BrandCreate;

    const RESOURCE_NAME_SINGULAR: &str = "brand";
    const RESOURCE_NAME_PLURAL: &str = "brands";
    const LIST_PATH: &'static str = "api/v1/Brand/getall";
    const CREATE_PATH: &'static str = "api/v1/Brand/addBrand";
}

impl Brands {
    /// Brands are the one entity with in-place edit: PUT with the id as a
    /// query parameter and the same payload as create.
    pub async fn update(
        client: &ApiClient,
        id: &RecordId,
        payload: &BrandCreate,
    ) -> Result<Ack, ApiError> {
        client.put_json_by_id("api/v1/Brand", id, payload).await
    }
}

pub struct Models;

impl AdminResource for Models {
    type ListModel = Model;
    type CreateModel = ModelCreate;

    const RESOURCE_NAME_SINGULAR: &str = "model";
    const RESOURCE_NAME_PLURAL: &str = "models";
    const LIST_PATH: &'static str = "api/Model/getModels";
    const CREATE_PATH: &'static str = "api/Model/addModel";
    const DELETE_ROUTE: DeleteRoute = DeleteRoute::Delete("api/Model/delete");
}

pub struct YearGroups;

impl AdminResource for YearGroups {
    type ListModel = YearGroup;
    type CreateModel = YearGroupCreate;

    const RESOURCE_NAME_SINGULAR: &str = "year group";
    const RESOURCE_NAME_PLURAL: &str = "year groups";
    const LIST_PATH: &'static str = "api/YearGroup";
    const CREATE_PATH: &'static str = "api/YearGroup";
    const DELETE_ROUTE: DeleteRoute = DeleteRoute::PostQuery("api/YearGroup/delete");
}

impl YearGroups {
    /// Year groups already linked to `model_id` — the narrowed option set
    /// for the dependent selects.
    pub async fn list_for_model(
        client: &ApiClient,
        model_id: &RecordId,
    ) -> Result<Vec<YearGroup>, ApiError> {
        client
            .get_list(&format!("api/YearGroup/yearGroups/{model_id}"))
            .await
    }
}

pub struct DetailGroups;

impl AdminResource for DetailGroups {
    type ListModel = DetailGroup;
    type CreateModel = DetailGroupCreate;

    const RESOURCE_NAME_SINGULAR: &str = "detail group";
    const RESOURCE_NAME_PLURAL: &str = "detail groups";
    const LIST_PATH: &'static str = "api/DetailGroup/getall";
    const CREATE_PATH: &'static str = "api/DetailGroup/addDetailGroup";
    const DELETE_ROUTE: DeleteRoute = DeleteRoute::PostQuery("api/DetailGroup/delete");
}

impl DetailGroups {
    /// Detail groups already linked to the (model, year group) pair.
    pub async fn list_for_model_year(
        client: &ApiClient,
        model_id: &RecordId,
        year_group_id: &RecordId,
    ) -> Result<Vec<DetailGroup>, ApiError> {
        client
            .get_list_query(
                "api/DetailGroup/getByModelIdAndYearGroupId",
                &[
                    ("modelId", model_id.key()),
                    ("yearGroupId", year_group_id.key()),
                ],
            )
            .await
    }
}

pub struct Details;

impl AdminResource for Details {
    type ListModel = Detail;
    type CreateModel = DetailCreate;

    const RESOURCE_NAME_SINGULAR: &str = "detail";
    const RESOURCE_NAME_PLURAL: &str = "details";
    const LIST_PATH: &'static str = "api/Detail/getall";
    const CREATE_PATH: &'static str = "api/Detail/addDetail";
    const DELETE_ROUTE: DeleteRoute = DeleteRoute::Delete("api/Detail/delete");
}

pub struct Tags;

impl AdminResource for Tags {
    type ListModel = Tag;
    type CreateModel = TagCreate;

    const RESOURCE_NAME_SINGULAR: &str = "tag";
    const RESOURCE_NAME_PLURAL: &str = "tags";
    const LIST_PATH: &'static str = "api/v1/Tag/getTags";
    const CREATE_PATH: &'static str = "api/v1/Tag/addTag";
    const DELETE_ROUTE: DeleteRoute = DeleteRoute::Delete("api/v1/Tag/delete");
}

pub struct PromoCodes;

impl AdminResource for PromoCodes {
    type ListModel = PromoCode;
    type CreateModel = PromoCodeCreate;

    const RESOURCE_NAME_SINGULAR: &str = "promo code";
    const RESOURCE_NAME_PLURAL: &str = "promo codes";
    const LIST_PATH: &'static str = "api/v1/DiscountPromocode/getall";
    const CREATE_PATH: &'static str = "api/v1/DiscountPromocode/add";
    const DELETE_ROUTE: DeleteRoute = DeleteRoute::PostQuery("api/v1/DiscountPromocode/delete");
}

// ── Link tables: create posts the composite key as query parameters ──

pub struct ModelYearGroups;

impl AdminResource for ModelYearGroups {
    type ListModel = ModelYearGroupLink;
    type CreateModel = ModelYearGroupCreate;

    const RESOURCE_NAME_SINGULAR: &str = "model-year link";
    const RESOURCE_NAME_PLURAL: &str = "model-year links";
    const LIST_PATH: &'static str = "api/v1/ModelYearGroup";
    const CREATE_PATH: &'static str = "api/v1/ModelYearGroup";
    const CREATE_STYLE: CreateStyle = CreateStyle::QueryParams;
}

pub struct DetailGroupLinks;

impl AdminResource for DetailGroupLinks {
    type ListModel = DetailGroupLink;
    type CreateModel = DetailGroupLinkCreate;

    const RESOURCE_NAME_SINGULAR: &str = "detail-group link";
    const RESOURCE_NAME_PLURAL: &str = "detail-group links";
    const LIST_PATH: &'static str = "api/ModelYearGroupDetailGroup/getall";
    const CREATE_PATH: &'static str = "api/ModelYearGroupDetailGroup/add";
    const CREATE_STYLE: CreateStyle = CreateStyle::QueryParams;
}

pub struct FinalLinks;

impl AdminResource for FinalLinks {
    type ListModel = FinalLinkRow;
    type CreateModel = FinalLinkCreate;

    const RESOURCE_NAME_SINGULAR: &str = "final link";
    const RESOURCE_NAME_PLURAL: &str = "final links";
    const LIST_PATH: &'static str = "api/ModelYearGroupDetailGroupDetail/getall";
    const CREATE_PATH: &'static str = "api/ModelYearGroupDetailGroupDetail/add";
    const CREATE_STYLE: CreateStyle = CreateStyle::QueryParams;
}

pub struct DetailTags;

impl AdminResource for DetailTags {
    type ListModel = DetailTagLink;
    type CreateModel = DetailTagCreate;

    const RESOURCE_NAME_SINGULAR: &str = "detail-tag link";
    const RESOURCE_NAME_PLURAL: &str = "detail-tag links";
    const LIST_PATH: &'static str = "api/DetailTag/getDetailTags";
    const CREATE_PATH: &'static str = "api/DetailTag/addDetailTag";
    const CREATE_STYLE: CreateStyle = CreateStyle::QueryParams;
}
