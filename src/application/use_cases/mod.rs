/// Use cases module containing application business logic orchestration
mod build_dependency_tree;

pub use build_dependency_tree::BuildDependencyTreeUseCase;
