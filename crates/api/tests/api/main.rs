mod climate_routes;
mod dataset_queries;
