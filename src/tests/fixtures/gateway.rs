use crate::modules::entities::core::model::Model;
use crate::modules::membership::models::key::KeyModel;
use crate::modules::membership::models::member::MemberModel;
use crate::modules::membership::models::span::SpanModel;
use crate::shared::infrastructure::gateway::in_memory::InMemoryGateway;
use crate::tests::fixtures::models::ThingModel;

/// In-memory gateway with every resource the crate knows about registered.
pub fn make_gateway() -> InMemoryGateway {
    InMemoryGateway::new()
        .with_resource(ThingModel::ROOT, ThingModel::ID_KEY)
        .with_resource(KeyModel::ROOT, KeyModel::ID_KEY)
        .with_resource(MemberModel::ROOT, MemberModel::ID_KEY)
        .with_resource(SpanModel::ROOT, SpanModel::ID_KEY)
}
