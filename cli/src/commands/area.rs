use anyhow::Result;
use roofquote::geom::{area_square_meters, roof_squares, square_meters_to_square_feet, AreaModel, Polygon};

use super::parse_coordinate;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::AreaArgs) -> Result<()> {
    let points = args.points.iter()
        .map(|p| parse_coordinate(p))
        .collect::<Result<Vec<_>>>()?;
    let polygon = Polygon::new(points)?;

    let model = if args.spherical { AreaModel::Spherical } else { AreaModel::Planar };
    let square_meters = area_square_meters(polygon.points(), model);
    let square_feet = square_meters_to_square_feet(square_meters);

    println!("vertices:  {}", polygon.len());
    println!("area:      {square_meters:.2} m²");
    println!("area:      {square_feet:.0} ft²");
    println!("squares:   {:.1}", roof_squares(square_feet));
    Ok(())
}
