use bacwire_core::builders;
use bacwire_core::services::{
    PropertyValue, ReadPropertyRequest, SubscribeCovRequest, WhoIsRequest, WritePropertyRequest,
};
use bacwire_core::types::{ObjectId, ObjectType, PropertyId, Value};
use bacwire_tools::{to_hex, ObjectTypeArg};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bacwire-frame", about = "Build a BACnet/IP frame and print it as hex")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    WhoIs {
        #[arg(long)]
        low: Option<u32>,
        #[arg(long)]
        high: Option<u32>,
    },
    IAm {
        #[arg(long)]
        instance: u32,
        #[arg(long, default_value_t = 260)]
        vendor_id: u32,
    },
    ReadProp {
        #[arg(long, value_enum, default_value = "device")]
        object_type: ObjectTypeArg,
        #[arg(long)]
        instance: u32,
        /// Numeric property identifier.
        #[arg(long, default_value_t = 85)]
        property: u32,
        #[arg(long)]
        index: Option<u32>,
        #[arg(long, default_value_t = 1)]
        invoke_id: u8,
    },
    WriteProp {
        #[arg(long, value_enum, default_value = "analog-value")]
        object_type: ObjectTypeArg,
        #[arg(long)]
        instance: u32,
        #[arg(long)]
        value: f32,
        #[arg(long, default_value_t = 8)]
        priority: u8,
        #[arg(long, default_value_t = 1)]
        invoke_id: u8,
    },
    SubCov {
        #[arg(long, value_enum, default_value = "analog-input")]
        object_type: ObjectTypeArg,
        #[arg(long)]
        instance: u32,
        #[arg(long, default_value_t = 1)]
        process_id: u32,
        /// Subscription lifetime in seconds; omit to cancel.
        #[arg(long)]
        lifetime: Option<u32>,
        #[arg(long)]
        confirmed: bool,
        #[arg(long, default_value_t = 1)]
        invoke_id: u8,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let frame = match args.command {
        Command::WhoIs { low, high } => builders::who_is(WhoIsRequest {
            low_limit: low,
            high_limit: high,
        })?,
        Command::IAm {
            instance,
            vendor_id,
        } => builders::i_am(ObjectId::new(ObjectType::Device, instance), vendor_id)?,
        Command::ReadProp {
            object_type,
            instance,
            property,
            index,
            invoke_id,
        } => {
            let request = ReadPropertyRequest {
                array_index: index,
                ..ReadPropertyRequest::new(
                    ObjectId::new(object_type.into_object_type(), instance),
                    PropertyId::from_u32(property),
                )
            };
            builders::read_property(invoke_id, request)?
        }
        Command::WriteProp {
            object_type,
            instance,
            value,
            priority,
            invoke_id,
        } => {
            let request = WritePropertyRequest {
                object_id: ObjectId::new(object_type.into_object_type(), instance),
                property: PropertyValue::single(PropertyId::PresentValue, Value::real(value)?)
                    .with_priority(priority),
            };
            builders::write_property(invoke_id, request)?
        }
        Command::SubCov {
            object_type,
            instance,
            process_id,
            lifetime,
            confirmed,
            invoke_id,
        } => {
            let object_id = ObjectId::new(object_type.into_object_type(), instance);
            let request = match lifetime {
                Some(seconds) => SubscribeCovRequest {
                    issue_confirmed_notifications: Some(confirmed),
                    lifetime_seconds: Some(seconds),
                    ..SubscribeCovRequest::cancel(process_id, object_id)
                },
                None => SubscribeCovRequest::cancel(process_id, object_id),
            };
            builders::subscribe_cov(invoke_id, request)?
        }
    };

    log::debug!("built {} byte frame", frame.len());
    println!("{}", to_hex(&frame));
    Ok(())
}
